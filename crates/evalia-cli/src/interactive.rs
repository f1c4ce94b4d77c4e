//! Line-oriented front end for the intake wizard.
//!
//! Each step asks for its fields one per line. An empty answer keeps the
//! value shown in brackets (what was entered before, or the form default);
//! `<` abandons the step and goes back to the previous one.
//!
//! Detail questions (which grades were repeated, how much alcohol) are only
//! asked when the answer they qualify is not "No".

use std::io::{BufRead, Write};

use evalia_core::wizard::{Wizard, WizardStep};
use evalia_core::{Field, FieldKind, FieldValue, Section};
use tracing::debug;

/// Answer that returns to the previous step.
pub const BACK: &str = "<";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every step was committed and the wizard sits on review.
    Completed,
    /// Input ended before the review step.
    Aborted,
}

/// Drive `wizard` from its current step until review or end of input.
pub fn run_wizard<R: BufRead, W: Write>(
    wizard: &mut Wizard,
    input: &mut R,
    out: &mut W,
) -> eyre::Result<Outcome> {
    loop {
        let step = wizard.step();
        if step == WizardStep::Review {
            print_review(wizard, out)?;
            return Ok(Outcome::Completed);
        }

        writeln!(out)?;
        writeln!(out, "== {step} ==")?;
        writeln!(
            out,
            "(Enter conserva el valor entre corchetes; '{BACK}' vuelve al paso anterior)"
        )?;

        match ask_step(wizard, step, input, out)? {
            StepAnswer::Values(values) => {
                wizard.next(values)?;
            }
            StepAnswer::Back => {
                debug!(step = step.number(), "going back");
                wizard.previous();
            }
            StepAnswer::Eof => return Ok(Outcome::Aborted),
        }
    }
}

enum StepAnswer {
    Values(Vec<(Field, FieldValue)>),
    Back,
    Eof,
}

fn ask_step<R: BufRead, W: Write>(
    wizard: &Wizard,
    step: WizardStep,
    input: &mut R,
    out: &mut W,
) -> eyre::Result<StepAnswer> {
    let mut values: Vec<(Field, FieldValue)> = Vec::new();

    for field in step.fields() {
        if let Some(parent) = detail_parent(field) {
            let answer = values
                .iter()
                .find(|(f, _)| *f == parent)
                .map(|(_, v)| v.to_display_string())
                .unwrap_or_else(|| wizard.form_value(parent));
            if denied(&answer) {
                debug!(field = %field, "detail skipped");
                values.push((field, FieldValue::Text(String::new())));
                continue;
            }
        }

        let spec = field.spec();
        let current = wizard.form_value(field);

        write!(out, "{}", spec.prompt)?;
        if !spec.choices.is_empty() {
            write!(out, " ({})", spec.choices.join(" / "))?;
        }
        write!(out, " [{current}]: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(StepAnswer::Eof);
        }
        let answer = line.trim();
        if answer == BACK {
            return Ok(StepAnswer::Back);
        }

        let raw = if answer.is_empty() {
            current
        } else {
            answer.to_string()
        };
        if !raw.is_empty() {
            values.push((field, parse_answer(field, &raw)));
        }
    }

    Ok(StepAnswer::Values(values))
}

/// The yes/no or frequency answer a detail field qualifies.
pub fn detail_parent(field: Field) -> Option<Field> {
    match field {
        Field::GradeRepetitionDetails => Some(Field::GradeRepetitions),
        Field::AlcoholDetails => Some(Field::Alcohol),
        Field::TobaccoDetails => Some(Field::Tobacco),
        Field::MarijuanaDetails => Some(Field::Marijuana),
        Field::OtherDrugsDetails => Some(Field::OtherDrugs),
        _ => None,
    }
}

fn denied(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.eq_ignore_ascii_case("no")
}

/// Numeric fields keep a number when the answer parses as one.
pub fn parse_answer(field: Field, raw: &str) -> FieldValue {
    if let FieldKind::NumericWithUnit { .. } = field.kind() {
        let normalized = raw.trim().replace(',', ".");
        if let Ok(n) = normalized.parse::<i64>() {
            return FieldValue::Integer(n);
        }
        if let Ok(x) = normalized.parse::<f64>() {
            return FieldValue::Float(x);
        }
    }
    FieldValue::Text(raw.to_string())
}

fn print_review<W: Write>(wizard: &Wizard, out: &mut W) -> eyre::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {} ==", WizardStep::Review)?;
    for section in Section::ALL {
        writeln!(out)?;
        writeln!(out, "{}", section.title())?;
        let mut any = false;
        for field in section_fields(section) {
            let Some(value) = wizard.record().get(field).filter(|v| !v.is_blank()) else {
                continue;
            };
            writeln!(out, "  {}: {}", field.spec().prompt, value.to_display_string())?;
            any = true;
        }
        if !any {
            writeln!(out, "  (sin datos)")?;
        }
    }
    Ok(())
}

fn section_fields(section: Section) -> impl Iterator<Item = Field> {
    Field::all().filter(move |f| f.section() == section)
}
