use serde::Serialize;

use crate::engine::{InputField, SimulationInput, SimulationOutput};

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a SimulationInput,
    output: &'a SimulationOutput,
}

/// `{"input": {...}, "output": {...}}`, camelCase keys.
pub fn render_json(input: &SimulationInput, output: &SimulationOutput) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { input, output })
}

pub fn solvency_label(output: &SimulationOutput) -> &'static str {
    if output.is_solvent {
        "健全"
    } else {
        "債務超過リスクあり"
    }
}

pub fn render_text(input: &SimulationInput, output: &SimulationOutput) -> String {
    let mut lines = vec!["入力".to_string()];
    for field in InputField::ALL {
        lines.push(format!(
            "  {}: {} 万円",
            field.label(),
            format_amount(field.get(input))
        ));
    }

    lines.push(String::new());
    lines.push("シミュレーション結果".to_string());
    lines.push(format!("  財務状況: {}", solvency_label(output)));
    lines.push(format!("  自己資本: {} 万円", format_amount(output.equity)));
    lines.push(format!(
        "  年間キャッシュフロー: {} 万円",
        format_amount(output.cash_flow)
    ));
    lines.push(format!("  負債比率: {:.1} %", output.debt_ratio));

    lines.join("\n")
}

/// Each input with its key, slider range and explanation.
pub fn render_field_guide() -> String {
    let mut lines = vec!["入力項目".to_string()];
    for field in InputField::ALL {
        let range = field.range();
        lines.push(format!(
            "  {} ({}): {}〜{} 万円, {} 刻み",
            field.label(),
            field.key(),
            format_amount(range.min),
            format_amount(range.max),
            format_amount(range.step)
        ));
        lines.push(format!("    {}", field.description()));
    }
    lines.join("\n")
}

/// Thousands separators, at most three decimals, trailing zeros dropped.
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let abs = rounded.abs();
    let whole = abs.trunc();

    let digits = format!("{whole:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let fraction = format!("{:.3}", abs - whole);
    let fraction = fraction.trim_start_matches('0').trim_end_matches('0');
    if fraction == "." {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{fraction}")
    }
}
