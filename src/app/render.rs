//! Terminal rendering of estimates.
//!
//! The language is carried by [`RenderContext`]; nothing here reads global
//! state. Display caps only affect the progress bar, never the estimate.

use crate::app::i18n::Messages;
use crate::domain::model::{AlcoholInput, Assessment, Factor, GainResult, Sex, SmokingInput};
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub alcohol_cap_months: f64,
    pub smoking_cap_months: f64,
    pub combined_cap_months: f64,
    pub bar_width: usize,
    /// Append the model detail JSON block
    pub show_details: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            alcohol_cap_months: 36.0,
            smoking_cap_months: 60.0,
            combined_cap_months: 120.0,
            bar_width: 30,
            show_details: false,
        }
    }
}

impl DisplaySettings {
    pub fn cap_for(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Alcohol => self.alcohol_cap_months,
            Factor::Smoking => self.smoking_cap_months,
        }
    }
}

impl Validate for DisplaySettings {
    fn validate(&self) -> Result<()> {
        validate_positive("display.alcohol_cap_months", self.alcohol_cap_months)?;
        validate_positive("display.smoking_cap_months", self.smoking_cap_months)?;
        validate_positive("display.combined_cap_months", self.combined_cap_months)?;
        validate_positive("display.bar_width", self.bar_width as f64)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub messages: Messages,
    pub display: DisplaySettings,
}

impl RenderContext {
    pub fn new(messages: Messages, display: DisplaySettings) -> Self {
        Self { messages, display }
    }
}

/// `min(months, cap) / cap`, always within [0, 1].
pub fn progress_fraction(months: f64, cap: f64) -> f64 {
    if cap <= 0.0 || !months.is_finite() {
        return 0.0;
    }
    months.clamp(0.0, cap) / cap
}

pub fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (fraction * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        fraction * 100.0
    )
}

/// Whole months print without decimals, fractional ones with one.
pub fn format_months(months: f64) -> String {
    if months.fract() == 0.0 {
        format!("{:.0}", months)
    } else {
        format!("{:.1}", months)
    }
}

pub fn sex_label(messages: &Messages, sex: Sex) -> &str {
    match sex {
        Sex::Male => messages.text("male"),
        Sex::Female => messages.text("female"),
    }
}

pub fn headline(messages: &Messages, assessment: &Assessment, result: &GainResult) -> String {
    let months = format_months(result.months);
    match assessment {
        Assessment::Alcohol(input) => messages.format(
            "headline_alcohol",
            &[
                ("now", input.current_days.to_string()),
                ("goal", input.target_days.to_string()),
                ("months", months),
            ],
        ),
        Assessment::Smoking(input) => messages.format(
            "headline_smoking",
            &[
                ("now", input.current_cigarettes.to_string()),
                ("goal", input.target_cigarettes.to_string()),
                ("months", months),
            ],
        ),
    }
}

pub fn alcohol_tips(messages: &Messages, input: &AlcoholInput) -> Vec<String> {
    if input.target_days >= input.current_days {
        return vec![messages.text("tip_try_reduce").to_string()];
    }

    let mut tips = vec![messages.format(
        "tip_good_start",
        &[
            ("x", input.current_days.to_string()),
            ("y", input.target_days.to_string()),
        ],
    )];
    if input.current_days - input.target_days >= 2 {
        tips.push(messages.text("tip_reduce_one").to_string());
    }
    tips.push(messages.text("tip_support").to_string());
    tips
}

pub fn smoking_tips(messages: &Messages, input: &SmokingInput) -> Vec<String> {
    if input.target_cigarettes < input.current_cigarettes {
        vec![
            messages.text("tip_smoking_stepwise").to_string(),
            messages.text("tip_smoking_support").to_string(),
        ]
    } else {
        vec![messages.text("tip_smoking_try_reduce").to_string()]
    }
}

fn section_header(messages: &Messages, factor: Factor) -> &str {
    match factor {
        Factor::Alcohol => messages.text("alcohol_header"),
        Factor::Smoking => messages.text("smoking_header"),
    }
}

fn render_section(ctx: &RenderContext, assessment: &Assessment, result: &GainResult) -> Result<String> {
    let messages = &ctx.messages;
    let cap = ctx.display.cap_for(assessment.factor());
    let mut lines = vec![
        section_header(messages, assessment.factor()).to_string(),
        format!("{}:", messages.text("your_gain")),
        headline(messages, assessment, result),
        String::new(),
        messages.text("lifespan_bar").to_string(),
        progress_bar(progress_fraction(result.months, cap), ctx.display.bar_width),
        String::new(),
        messages.text("tips").to_string(),
    ];

    lines.extend(match assessment {
        Assessment::Alcohol(input) => alcohol_tips(messages, input),
        Assessment::Smoking(input) => smoking_tips(messages, input),
    });

    if ctx.display.show_details {
        lines.push(String::new());
        lines.push(format!("{}:", messages.text("see_details")));
        lines.push(serde_json::to_string_pretty(result)?);
    }

    Ok(lines.join("\n"))
}

fn footer(messages: &Messages) -> String {
    format!("---\n{}", messages.text("disclaimer"))
}

pub fn render_report(ctx: &RenderContext, assessment: &Assessment, result: &GainResult) -> Result<String> {
    Ok(format!(
        "{}\n\n{}\n",
        render_section(ctx, assessment, result)?,
        footer(&ctx.messages)
    ))
}

pub fn render_combined(
    ctx: &RenderContext,
    alcohol: (&AlcoholInput, &GainResult),
    smoking: (&SmokingInput, &GainResult),
    total_months: f64,
) -> Result<String> {
    let messages = &ctx.messages;
    let alcohol_section = render_section(ctx, &Assessment::Alcohol(alcohol.0.clone()), alcohol.1)?;
    let smoking_section = render_section(ctx, &Assessment::Smoking(smoking.0.clone()), smoking.1)?;

    let summary = [
        messages.text("combined_header").to_string(),
        messages.format("headline_combined", &[("months", format_months(total_months))]),
        progress_bar(
            progress_fraction(total_months, ctx.display.combined_cap_months),
            ctx.display.bar_width,
        ),
    ]
    .join("\n");

    Ok(format!(
        "{}\n\n{}\n\n{}\n\n{}\n",
        alcohol_section,
        smoking_section,
        summary,
        footer(messages)
    ))
}
