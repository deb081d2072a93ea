use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::remote::{Collaborator, Request, Response};

use super::*;

pub(crate) enum Poll {
    Idle,
    Pending,
    Done(Response),
    /// The thread went away without answering (it panicked).
    Lost,
}

/// At most one remote command in flight.
#[derive(Default)]
pub(crate) struct Worker {
    rx: Option<Receiver<Response>>,
}

impl Worker {
    pub(crate) fn spawn(
        &mut self,
        request: Request,
        collaborator: Arc<dyn Collaborator>,
        user: String,
    ) -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let label = request.label();
        thread::Builder::new()
            .name(format!("kit-{}", label.replace(' ', "-")))
            .spawn(move || {
                let response = request.send(collaborator.as_ref(), &user);
                let _ = tx.send(response);
            })
            .with_context(|| format!("spawn worker for {}", label))?;
        self.rx = Some(rx);
        Ok(())
    }

    pub(crate) fn poll(&mut self) -> Poll {
        let Some(rx) = &self.rx else {
            return Poll::Idle;
        };
        match rx.try_recv() {
            Ok(response) => {
                self.rx = None;
                Poll::Done(response)
            }
            Err(TryRecvError::Empty) => Poll::Pending,
            Err(TryRecvError::Disconnected) => {
                self.rx = None;
                Poll::Lost
            }
        }
    }
}
