use clap::{Subcommand, ValueEnum};
use habitual_core::frequency::{self, DayToken, FrequencyDraft, Period};

use super::{print_json, CliResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Days,
    Weeks,
}

impl From<PeriodArg> for Period {
    fn from(p: PeriodArg) -> Self {
        match p {
            PeriodArg::Days => Period::Days,
            PeriodArg::Weeks => Period::Weeks,
        }
    }
}

#[derive(Subcommand)]
pub enum FreqAction {
    /// Build a display string from a cadence
    Encode {
        /// Repeat every N periods; non-numeric or zero counts as 1
        #[arg(long, default_value = "1")]
        every: String,
        #[arg(long, value_enum, default_value = "weeks")]
        period: PeriodArg,
        /// Weekdays, comma-separated (e.g. Mon,Wed,Fri)
        #[arg(long, value_delimiter = ',')]
        days: Vec<String>,
    },
    /// Parse a display string back into a cadence
    Decode {
        /// Frequency text, e.g. "Every 2 weeks on Mon, Fri"
        text: String,
    },
}

pub fn run(action: FreqAction) -> CliResult {
    match action {
        FreqAction::Encode { every, period, days } => {
            let days = days
                .iter()
                .map(|d| DayToken::parse(d).ok_or_else(|| format!("unknown day '{}'", d.trim())))
                .collect::<Result<Vec<_>, _>>()?;
            let draft = FrequencyDraft::new(every, period.into(), days);
            println!("{}", frequency::encode(&draft));
        }
        FreqAction::Decode { text } => {
            print_json(&frequency::decode(&text))?;
        }
    }
    Ok(())
}
