use crate::err::MultimapError;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Where the session writes everything the user sees.
#[async_trait]
pub trait Sink: Send {
  async fn print_message(&mut self, message: &str, new_line: bool) -> Result<(), MultimapError>;

  async fn print_list(&mut self, messages: &[String]) -> Result<(), MultimapError> {
    for message in messages {
      self.print_message(message, true).await?;
    }
    Ok(())
  }
}

pub struct Console<W> {
  out: W,
}

impl<W: AsyncWrite + Unpin + Send> Console<W> {
  pub fn new(out: W) -> Console<W> {
    Console { out }
  }

  #[cfg(test)]
  pub fn into_inner(self) -> W {
    self.out
  }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Sink for Console<W> {
  async fn print_message(&mut self, message: &str, new_line: bool) -> Result<(), MultimapError> {
    self.out.write_all(message.as_bytes()).await?;
    if new_line {
      self.out.write_all(b"\n").await?;
    }
    self.out.flush().await?;
    Ok(())
  }
}
