use std::process;

use emailer::{
    application::{
        error::AppError,
        render::{RenderPipelineConfig, RenderService, configure_render_service, render_service},
    },
    config,
    infra::{document, output, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging)?;
    configure_render_service(RenderPipelineConfig::from(&settings.render))
        .map_err(|err| AppError::unexpected(err.to_string()))?;

    info!(
        target = "emailer::main",
        document = %cli_args.document.display(),
        output = %cli_args.output.display(),
        "Generating email"
    );

    let document = document::load(&cli_args.document)?;
    let rendered = render_service().render(&document)?;

    output::write_html(&cli_args.output, &rendered.html)?;
    if let Some(manifest) = cli_args.manifest.as_ref() {
        output::write_manifest(manifest, &rendered.inline_images)?;
    }

    Ok(())
}
