use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::process;

use pdfimages::routes::create_app;
use pdfimages::state::ServiceCollection;
use pdfimages::util::settings::Settings;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::fmt().json().finish();
    tracing::subscriber::set_global_default(subscriber).expect("Could not init tracing.");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    let services = match ServiceCollection::build(&settings) {
        Ok(services) => services,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    let app = create_app(services, settings.request_timeout);

    let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), settings.port);
    info!("listening on {}", &addr);
    if let Err(err) = axum::Server::bind(&addr).serve(app.into_make_service()).await {
        error!("Server error: {}", err);
        process::exit(1);
    }
}
