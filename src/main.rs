use anyhow::Result;
use flex_button::{load_config, Host};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting flex-button demo host");

    let gallery = load_config()?;
    info!("Gallery: {}", gallery.name);
    info!("Number of buttons: {}", gallery.buttons.len());

    let host = Host::new(gallery);

    for button in host.buttons() {
        let title = button.config().title.clone().unwrap_or_else(|| "<icon only>".to_string());

        let idle = button.render();
        println!("== {} (idle)\n{}", title, idle.tree);

        idle.activate();
        let loading = button.render();
        println!("== {} (loading)\n{}", title, loading.tree);

        // Tapping again while loading reaches the host, which ignores it
        loading.activate();

        for outcome in host.wait_idle().await {
            if !outcome.stdout.is_empty() {
                info!("Work output: {}", outcome.stdout);
            }
        }
        println!("== {} (done)\n{}", title, button.render().tree);
    }

    info!("All buttons idle");
    Ok(())
}
