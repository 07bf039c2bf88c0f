use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use simulator::report::render_field_guide;
use simulator::session::{self, parse_finite, OutputFormat};
use simulator::SimulationInput;

/// All amounts are in 万円; rent and expenses are monthly.
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "不動産投資 債務超過シミュレーター - equity, debt ratio and cash flow for a property purchase")]
struct Cli {
    /// 資本金
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true, value_parser = finite_amount)]
    capital: f64,

    /// 社長貸付
    #[arg(long, default_value_t = 900.0, allow_negative_numbers = true, value_parser = finite_amount)]
    loan: f64,

    /// 不動産取得価格
    #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true, value_parser = finite_amount)]
    property_price: f64,

    /// リフォーム費用
    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true, value_parser = finite_amount)]
    reform_cost: f64,

    /// 月間家賃収入
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true, value_parser = finite_amount)]
    rent_income: f64,

    /// 月間経費
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true, value_parser = finite_amount)]
    expenses: f64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Read `field=value` lines from stdin and re-run after each one
    #[arg(short, long)]
    interactive: bool,

    /// Describe each input with its usual range, then exit
    #[arg(long)]
    fields: bool,
}

fn finite_amount(raw: &str) -> Result<f64, String> {
    parse_finite(raw).ok_or_else(|| format!("'{raw}' is not a finite number"))
}

impl Cli {
    fn input(&self) -> SimulationInput {
        SimulationInput {
            capital: self.capital,
            loan: self.loan,
            property_price: self.property_price,
            reform_cost: self.reform_cost,
            rent_income: self.rent_income,
            expenses: self.expenses,
        }
    }

    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "Parsed arguments");

    if cli.fields {
        println!("{}", render_field_guide());
    } else if cli.interactive {
        let stdin = std::io::stdin();
        session::run(cli.input(), stdin.lock(), std::io::stdout(), cli.format())?;
    } else {
        println!("{}", session::render(&cli.input(), cli.format())?);
    }

    Ok(())
}
