//! Example: Attributing an error as it propagates through layers
//!
//! Each layer adds what it knows about the failure. The handler at the top
//! reads the attributes back and prints the full description.

use std::{error::Error, fmt};

use errkit::{Attributor, config::KitConfig, install, prelude::*};

#[derive(Debug)]
enum Feature {
    Checkout,
}

#[derive(Debug)]
struct GatewayTimeout;

impl fmt::Display for GatewayTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payment gateway timed out")
    }
}

impl Error for GatewayTimeout {}

fn charge_card() -> Result<(), AttributedError> {
    Err(GatewayTimeout).attributes(attributes![
        Severity::Warning,
        Source::External,
        debug_info!["gateway-eu-1", 30_000],
    ])
}

fn place_order() -> Result<(), AttributedError> {
    charge_card().attributes(attributes![
        Tag::new(Feature::Checkout),
        Rank::High,
        Severity::Error,
    ])
}

fn handle_request() -> Result<(), AttributedError> {
    place_order().attributes(attributes![
        UserLevel::Error,
        Localization::new("We couldn't reach your bank. Please try again.")
            .with_title("Payment failed"),
    ])
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = KitConfig::from_toml_str("[identity]\nkind = \"sequence\"\nstart = 1000\n")?;
    install(Attributor::from(&config))?;

    let Err(error) = handle_request() else {
        return Ok(());
    };

    println!("message:          {error}");
    println!("severity:         {:?}", error.severity());
    println!("highest severity: {:?}", error.highest_severity());
    println!("rank:             {:?}", error.rank());
    println!("user message:     {:?}", error.localized_message());
    println!("features:         {:?}", error.tags_of::<Feature>());
    println!();
    println!("{error:#}");

    Ok(())
}
