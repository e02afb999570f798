use enrollment_scheduler::slot_schedule::course_source::{
    CourseSource, HttpCourseSource, JsonCatalogSource,
};
use enrollment_scheduler::slot_schedule::error::SchedulerError;
use enrollment_scheduler::slot_schedule::helpers::format_outcome;
use enrollment_scheduler::slot_schedule::models::{Args, Config};
use enrollment_scheduler::slot_schedule::run_tool::{run, RunSummary};
use enrollment_scheduler::slot_schedule::schedule_saver::{HttpScheduleSaver, JsonCatalogSaver};

use clap::Parser;
use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use log::{error, info, warn};
use reqwest::Client;

async fn run_with_source<CS: CourseSource>(
    course_source: CS,
    http_client: Client,
    args: &Args,
    config: &Config,
) -> Result<RunSummary, SchedulerError> {
    match &config.save_url {
        Some(save_url) => {
            let saver = HttpScheduleSaver {
                client: http_client,
                save_url: save_url.clone(),
            };
            run(course_source, saver, args, config).await
        }
        None => {
            let saver = JsonCatalogSaver {
                catalog_json_path: args.catalog_json_path.clone(),
            };
            run(course_source, saver, args, config).await
        }
    }
}

#[tokio::main]
async fn main() {
    /* Setup logging */
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .init();

    /* Get all the required resources */
    let args = Args::parse();
    let config: Config = Figment::new()
        .merge(Json::file(&args.config_json_path))
        .merge(Env::prefixed("SCHED_"))
        .extract()
        .unwrap();
    info!(
        "Read config.json from {}",
        std::path::absolute(&args.config_json_path)
            .unwrap()
            .display()
    );
    let http_client = Client::new();

    /* Generate, preview and maybe save */
    let result = match &config.course_source_url {
        Some(base_url) => {
            let source = HttpCourseSource {
                client: http_client.clone(),
                base_url: base_url.clone(),
            };
            run_with_source(source, http_client, &args, &config).await
        }
        None => {
            let source = JsonCatalogSource {
                catalog_json_path: args.catalog_json_path.clone(),
            };
            run_with_source(source, http_client, &args, &config).await
        }
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(err) => {
            error!("{}", err);
            std::process::exit(if err.is_input_error() { 2 } else { 1 });
        }
    };

    println!("{}", format_outcome(&summary.outcome));
    if !summary.preview.is_empty() {
        println!("\n{}", summary.preview);
    }
    let saved = summary.report.is_some();
    let report = summary.report.unwrap_or(summary.planned);
    for failed in report.failed() {
        let message = failed.error.as_deref().unwrap_or("unknown error");
        if saved {
            error!(
                "Could not save schedule for course {}: {}",
                failed.course_id, message
            );
        } else {
            warn!(
                "Schedule for course {} would not be kept: {}",
                failed.course_id, message
            );
        }
    }
}
