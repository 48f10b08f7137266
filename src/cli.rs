use clap::Parser;

#[derive(Parser)]
#[command(name = "mcp-demo", about = "Minimal MCP demonstration server over stdio.", version)]
pub struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
