pub mod server;

use rmcp::ServiceExt;

use crate::fetch;
use server::DemoServer;

/// Start the MCP server over stdio. Blocks until the connection closes.
pub fn serve_stdio() -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let http = fetch::client()?;
        let server = DemoServer::new(http);

        tracing::info!("serving MCP over stdio");
        let service = server.serve(rmcp::transport::stdio()).await?;
        service.waiting().await?;

        Ok(())
    })
}
