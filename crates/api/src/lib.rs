mod error;
mod job_schedulers;
mod reminder;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
pub use error::RemindrError;
pub use job_schedulers::ReminderPoller;
use remindr_infra::{NotificationDispatcher, RemindrContext};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    poller: ReminderPoller,
}

impl Application {
    pub async fn new(context: RemindrContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let poller = Application::start_poller(context);

        Ok(Self {
            server,
            port,
            poller,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_poller(context: RemindrContext) -> ReminderPoller {
        let dispatcher = NotificationDispatcher::from_config(&context.config);
        let mut poller = ReminderPoller::new(context, dispatcher);
        poller.start();
        poller
    }

    async fn configure_server(context: RemindrContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(mut self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.poller.stop();
        res
    }
}
