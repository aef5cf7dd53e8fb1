//! End-to-end walkthrough against the live mail.tm service.
//!
//! Run with `RUST_LOG=mailtm_client=debug cargo run --example demo`.

use mailtm_client::{Client, Error};
use rand::Rng;
use rand::distr::Alphanumeric;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let anon = Client::new()?;
    let Some(domains) = anon.get_domains().await? else {
        println!("No domains returned");
        return Ok(());
    };
    let Some(domain) = domains.members().iter().find(|d| d.is_active) else {
        println!("No active domain available");
        return Ok(());
    };

    let mut rng = rand::rng();
    let alias: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect();
    let password: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    let address = format!("{alias}@{}", domain.domain);

    if let Some(account) = anon.create_account(&address, &password).await? {
        println!("Created: {} (quota {} bytes)", account.address, account.quota);
    }
    let Some(token) = anon.get_token(&address, &password).await? else {
        println!("No token returned");
        return Ok(());
    };
    anon.close();

    let client = Client::with_token(token)?;
    if let Some(me) = client.get_me().await? {
        println!("Signed in as {}", me.address);
    }

    if let Some(page) = client.get_messages(1).await? {
        println!("{} message(s) in inbox", page.total_items());
        for msg in page {
            println!("From: {}, Subject: {}", msg.from.address, msg.subject);
        }
    }

    // The service answers deletions with 204, which is not a 200 success.
    match client.delete_account(None).await {
        Ok(()) | Err(Error::UnexpectedStatus(204)) => println!("Deleted {address}"),
        Err(err) => return Err(err),
    }
    client.close();
    Ok(())
}
