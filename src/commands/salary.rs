use anyhow::Result;

use rabota::config::Config;
use rabota::normalize::{SalaryInput, SalaryNormalizer};

pub fn salary(config: &Config, text: &str) -> Result<()> {
    let salary = SalaryNormalizer::new(&config.normalizer).normalize(SalaryInput::Text(text));

    println!("{salary}");
    if salary.is_specified() {
        println!("  Average: {}", salary.average());
        if let Some(max) = salary.max_value() {
            println!("  Max: {max}");
        }
    }
    println!("{}", serde_json::to_string_pretty(&salary.to_dict())?);

    Ok(())
}
