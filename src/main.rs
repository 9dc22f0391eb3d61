use anyhow::Context;
use favqs_checks::configuration::get_configuration;
use favqs_checks::domain::{NewUser, UserUpdate};
use favqs_checks::telemetry::{get_subscriber, init_subscriber};
use favqs_checks::workflows::{create_user, verify_read, verify_update};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration.")?;
    let subscriber = get_subscriber(
        configuration.telemetry.subscriber_name.clone(),
        configuration.telemetry.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let client = configuration
        .quote_service
        .client()
        .context("Failed to build the quote service client.")?;

    let fixture = create_user(&client, NewUser::generate()).await?;
    verify_read(&client, &fixture).await?;
    let updated = verify_update(&client, fixture, UserUpdate::generate()).await?;

    tracing::info!(login = %updated.login, "All user checks passed");
    Ok(())
}
