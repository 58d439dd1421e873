mod account_controller;
mod api_error;
mod appointment_controller;
mod auth_information;
mod auth_middleware;
mod bed_controller;
mod common_utils;
mod discharge_controller;
mod doctor_controller;
mod emergency_controller;
mod invoice_controller;
mod invoice_pdf;
mod patient_controller;
mod prescription_controller;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::NormalizePath;
use actix_web::{web, App, HttpServer};
use slog::{error, info, o, Drain, Logger};

use common::mailer::{NotificationPublisher, SmtpNotifier};
use common::server_config::{self, AuthConfig};
use database::database_factory;
use database::hms_dbprovider::HmsDbProvider;

fn configure_log() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let console_drain = slog_term::FullFormat::new(decorator).build().fuse();

    // It is used for Synchronization
    let console_drain = slog_async::Async::new(console_drain).build().fuse();

    // Root logger
    Logger::root(console_drain, o!("v"=>env!("CARGO_PKG_VERSION")))
}

#[derive(Clone)]
pub struct AppState {
    pub log: Logger,
    pub db: Arc<dyn HmsDbProvider + Send + Sync>,
    pub notifier: Arc<dyn NotificationPublisher>,
    pub auth: AuthConfig,
    pub frontend_url: String,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let log = configure_log();

    let config = match server_config::load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(log, "Error loading config: {:?}", e);
            return Err(std::io::Error::other(e));
        }
    };

    let Some(server_config) = config.server else {
        return Err(std::io::Error::other("server config section missing"));
    };
    let Some(db_config) = config.database else {
        return Err(std::io::Error::other("database config section missing"));
    };
    let Some(auth_config) = config.auth else {
        return Err(std::io::Error::other("auth config section missing"));
    };
    let Some(mail_config) = config.mail else {
        return Err(std::io::Error::other("mail config section missing"));
    };
    let frontend_url = config
        .frontend_url
        .unwrap_or_else(|| "http://localhost:8000".to_string());

    let db_provider = database_factory::create_db_instance(&db_config).await;
    let Some(db_instance) = db_provider else {
        error!(log, "Failed to create database provider");
        return Err(std::io::Error::other("db_provider is none"));
    };

    let notifier: Arc<dyn NotificationPublisher> = match SmtpNotifier::new(&mail_config) {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            error!(log, "Failed to configure SMTP notifier: {}", e);
            return Err(std::io::Error::other("smtp notifier misconfigured"));
        }
    };

    let app_state = AppState {
        log: log.clone(),
        db: db_instance,
        notifier,
        auth: auth_config.clone(),
        frontend_url,
    };

    info!(
        log,
        "Starting the server at {}:{}", server_config.host, server_config.port
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new().wrap(NormalizePath::trim()).wrap(cors).service(
            web::scope("/api")
                .app_data(web::Data::new(app_state.clone()))
                // open endpoints
                .service(account_controller::signup)
                .service(account_controller::activate_account)
                .service(account_controller::login)
                // everything else requires a bearer token
                .service(
                    web::scope("")
                        .wrap(auth_middleware::AuthMiddleware {
                            auth: app_state.auth.clone(),
                        })
                        // fixed paths before {id} routes
                        .service(doctor_controller::my_profile)
                        .service(doctor_controller::update_profile)
                        .service(doctor_controller::dashboard_stats)
                        .service(doctor_controller::my_patients)
                        .service(doctor_controller::discharged_patients)
                        .service(doctor_controller::list_doctors)
                        .service(doctor_controller::retrieve_doctor)
                        .service(patient_controller::my_profile)
                        .service(patient_controller::update_profile)
                        .service(patient_controller::dashboard_overview)
                        .service(appointment_controller::list_appointments)
                        .service(appointment_controller::book_appointment)
                        .service(appointment_controller::cancel_appointment)
                        .service(prescription_controller::list_prescriptions)
                        .service(prescription_controller::create_from_appointment)
                        .service(bed_controller::ward_summary)
                        .service(bed_controller::list_beds)
                        .service(bed_controller::create_bed)
                        .service(bed_controller::assign_patient)
                        .service(bed_controller::release_bed)
                        .service(emergency_controller::active_cases)
                        .service(emergency_controller::list_cases)
                        .service(emergency_controller::create_case)
                        .service(emergency_controller::resolve_case)
                        .service(discharge_controller::list_discharges)
                        .service(discharge_controller::create_discharge)
                        .service(invoice_controller::outstanding)
                        .service(invoice_controller::paid)
                        .service(invoice_controller::list_invoices)
                        .service(invoice_controller::create_invoice)
                        .service(invoice_controller::pay_invoice)
                        .service(invoice_controller::download_invoice),
                ),
        )
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run()
    .await
}
