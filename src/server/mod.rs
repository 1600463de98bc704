//! Protocol server - dispatcher state machine and the stdio line loop

mod dispatcher;

pub use dispatcher::{Dispatcher, DispatcherState, ServeStats};

use tokio::io::BufReader;

use crate::error::Result;

/// Serve requests on stdin/stdout until stdin closes
pub async fn serve_stdio(dispatcher: &Dispatcher) -> Result<ServeStats> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    dispatcher.run(reader, writer).await
}
