use console::style;
use std::fmt::Display;

/// White bold — report and section headings
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim — explanations, secondary text, rules
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Cyan underlined — URLs, citations
pub fn url<D: Display>(text: D) -> String {
    style(text).cyan().underlined().to_string()
}

/// Green bold — checkmarks, saved files
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// Red bold — failures
pub fn error<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Yellow — improvement points, warnings
pub fn yellow<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Cyan bold — bullets, visualizable markers
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// `score/max`, green from 80%, yellow from 50%, red below.
pub fn score(score: u32, max: u32) -> String {
    let text = format!("{score}/{max}");
    let percent = u64::from(score) * 100 / u64::from(max.max(1));
    let styled = match percent {
        80.. => style(text).green(),
        50..=79 => style(text).yellow(),
        _ => style(text).red(),
    };
    styled.bold().to_string()
}
