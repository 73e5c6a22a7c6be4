use anyhow::Result;
use neo_core::config::DashboardConfig;

pub fn run(
    mut config: DashboardConfig,
    host: Option<String>,
    port: Option<u16>,
    open: bool,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(config.server.bind_addr()).await?;
        let actual_port = listener.local_addr()?.port();
        println!(
            "NEO dashboard → http://localhost:{actual_port}  (upstream {}, plots in {})",
            config.upstream.base_url,
            config.plot_dir.display()
        );

        tokio::select! {
            res = neo_server::serve_on(config, listener, open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
