use anyhow::Context;
use clap::Parser;
use skycast_core::{NominatimClient, OpenMeteoClient, Pipeline};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather for an address")]
pub struct Cli {
    /// Address to fetch the weather for.
    #[arg(short = 'a', long)]
    pub address: String,

    /// Show an N-day forecast instead of current conditions (1-16).
    #[arg(long, value_name = "DAYS")]
    pub forecast: Option<u8>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let geocoder = NominatimClient::new().context("failed to build geocoding client")?;
        let pipeline = Pipeline::new(geocoder, OpenMeteoClient::new());

        let rendered = match self.forecast {
            Some(days) => {
                let forecast = pipeline.forecast(&self.address, days).await?;
                serde_json::to_string_pretty(&forecast)?
            }
            None => {
                let report = pipeline.current(&self.address).await?;
                serde_json::to_string_pretty(&report)?
            }
        };

        println!("{rendered}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn address_is_required() {
        let err = Cli::try_parse_from(["skycast"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn help_flag_short_circuits() {
        let err = Cli::try_parse_from(["skycast", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["skycast", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn short_and_long_address_forms() {
        let cli = Cli::try_parse_from(["skycast", "-a", "Berlin"]).unwrap();
        assert_eq!(cli.address, "Berlin");
        assert!(cli.forecast.is_none());

        let cli =
            Cli::try_parse_from(["skycast", "--address", "1600 Pennsylvania Ave NW"]).unwrap();
        assert_eq!(cli.address, "1600 Pennsylvania Ave NW");
    }

    #[test]
    fn forecast_days_parsed() {
        let cli = Cli::try_parse_from(["skycast", "-a", "Berlin", "--forecast", "5"]).unwrap();
        assert_eq!(cli.forecast, Some(5));
    }

    #[test]
    fn address_passes_through_unmodified() {
        let cli = Cli::try_parse_from(["skycast", "-a", "  padded  "]).unwrap();
        assert_eq!(cli.address, "  padded  ");
    }
}
