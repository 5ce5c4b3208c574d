use std::error::Error;
use std::sync::Arc;

use futures::future::FutureExt;
use tokio::sync::{mpsc, Mutex};
use warp::Filter;

use backend::config::get_variable;
use backend::environment::Environment;
use backend::homes::HomesStore;
use backend::log::{info, initialize_logger};
use backend::routes;
use backend::store::FileBlob;
use backend::urls::Urls;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let logger = initialize_logger();

    let main_port: u16 = get_variable("BACKEND_PORT")
        .parse()
        .expect("parse BACKEND_PORT as u16");
    let admin_port: u16 = get_variable("BACKEND_ADMIN_PORT")
        .parse()
        .expect("parse BACKEND_ADMIN_PORT as u16");

    info!(logger, "Starting..."; "main_port" => main_port, "admin_port" => admin_port);
    let logger = Arc::new(logger);

    info!(logger, "Opening homes collection...");
    let blob = FileBlob::from_env();
    let homes = HomesStore::open(Box::new(blob)).expect("open homes collection");
    info!(logger, "Opened homes collection"; "homes" => homes.count());
    let homes = Arc::new(Mutex::new(homes));

    let urls = Arc::new(Urls::new(
        get_variable("BACKEND_BASE_URL"),
        get_variable("BACKEND_HOMES_PATH"),
    ));

    let environment = Environment::new(logger.clone(), homes, urls);

    let (termination_sender, mut termination_receiver) = mpsc::channel::<()>(1);

    let terminate = Arc::new(move || {
        let termination_sender = termination_sender.clone();

        async move {
            let termination_sender = termination_sender.clone();
            termination_sender.send(()).await.unwrap();
        }
        .boxed()
    });

    let should_terminate = async move {
        termination_receiver.recv().await;
    }
    .shared();

    let ctrlc = {
        let should_terminate = should_terminate.clone();
        let terminate = terminate.clone();

        let signal = tokio::signal::ctrl_c();

        async move {
            let terminate = terminate.clone();

            tokio::select! {
                _ = should_terminate => {},
                _ = signal => {
                    terminate().await;
                }
            }
        }
    };

    let main_server = {
        let should_terminate = should_terminate.clone();

        let logger2 = logger.clone();

        let list_route = routes::make_list_route(environment.clone());
        let count_route = routes::make_count_route(environment.clone());
        let create_route = routes::make_create_route(environment.clone());
        let retrieve_route = routes::make_retrieve_route(environment.clone());
        let update_route = routes::make_update_route(environment.clone());
        let delete_route = routes::make_delete_route(environment.clone());
        let review_route = routes::make_review_route(environment.clone());
        let donation_route = routes::make_donation_route(environment.clone());
        let visit_route = routes::make_visit_route(environment.clone());

        // `count` must come before `retrieve` so that the literal
        // segment wins over the ID parameter.
        let routes = count_route
            .or(list_route)
            .or(create_route)
            .or(review_route)
            .or(donation_route)
            .or(visit_route)
            .or(update_route)
            .or(delete_route)
            .or(retrieve_route)
            .recover(move |r| routes::format_rejection(logger2.clone(), r));

        let (_, main_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], main_port), async {
                should_terminate.await;
            });

        main_server
    };

    let admin_server = {
        let should_terminate = should_terminate.clone();
        let terminate = terminate.clone();

        let routes = routes::admin::make_healthz_route(environment.clone()).or(
            routes::admin::make_termination_route(environment.clone(), terminate),
        );

        let (_, admin_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], admin_port), async {
                should_terminate.await;
            });

        admin_server
    };

    tokio::join!(ctrlc, main_server, admin_server);

    info!(logger, "Exiting gracefully...");

    Ok(())
}
