//! The nine-step intake wizard as an explicit state machine.
//!
//! The wizard owns the [`Record`] for the session. Leaving a step forward
//! commits that step's values; going back, jumping, or reviewing never
//! touches the record. [`Wizard::reset`] discards everything for a new
//! evaluation.

use jiff::civil::Date;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::fields::Field;
use crate::record::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    PatientData = 1,
    FamilyHistory = 2,
    MorbidHistory = 3,
    MentalHealth = 4,
    SchoolHistory = 5,
    SubstanceUse = 6,
    EatingDisorders = 7,
    Motivation = 8,
    Review = 9,
}

/// A navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Next,
    Previous,
    JumpTo(WizardStep),
    Reset,
}

impl WizardStep {
    pub const ALL: [WizardStep; 9] = [
        WizardStep::PatientData,
        WizardStep::FamilyHistory,
        WizardStep::MorbidHistory,
        WizardStep::MentalHealth,
        WizardStep::SchoolHistory,
        WizardStep::SubstanceUse,
        WizardStep::EatingDisorders,
        WizardStep::Motivation,
        WizardStep::Review,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<WizardStep> {
        WizardStep::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::PatientData => "Datos del Paciente",
            WizardStep::FamilyHistory => "Antecedentes Familiares",
            WizardStep::MorbidHistory => "Antecedentes Mórbidos",
            WizardStep::MentalHealth => "Salud Mental",
            WizardStep::SchoolHistory => "Historia Escolar",
            WizardStep::SubstanceUse => "Abuso de Sustancias",
            WizardStep::EatingDisorders => "Trastornos Alimentarios",
            WizardStep::Motivation => "Motivación para el Cambio",
            WizardStep::Review => "Revisión y Generación",
        }
    }

    /// Fields captured on this step, in form order.
    pub fn fields(self) -> impl Iterator<Item = Field> {
        Field::all().filter(move |f| f.section().wizard_step() == self)
    }

    /// Pure transition function. `Reset` always lands on the first step.
    pub fn transition(self, transition: Transition) -> WizardStep {
        match transition {
            Transition::Next => WizardStep::from_number(self.number() + 1).unwrap_or(self),
            Transition::Previous => self
                .number()
                .checked_sub(1)
                .and_then(WizardStep::from_number)
                .unwrap_or(self),
            Transition::JumpTo(step) => step,
            Transition::Reset => WizardStep::PatientData,
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

/// Session state: the current step and the record being built.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    record: Record,
    today: Date,
    /// Age last computed from the birth date, while nobody has overridden it.
    derived_age: Option<i64>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::with_today(jiff::Zoned::now().date())
    }

    /// A wizard that treats `today` as the evaluation date when none is given.
    pub fn with_today(today: Date) -> Self {
        Self {
            step: WizardStep::PatientData,
            record: Record::new(),
            today,
            derived_age: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Mutable access for the text-improvement pass on the review step.
    pub fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    /// The value a form should show: what was entered, else the form default.
    pub fn form_value(&self, field: Field) -> String {
        match self.record.get(field) {
            Some(value) => value.to_display_string(),
            None => field.spec().form_default.unwrap_or_default().to_string(),
        }
    }

    /// Commit the current step's values and move forward.
    ///
    /// Every value must belong to the current step; otherwise nothing is
    /// committed and the step does not change.
    pub fn next<I>(&mut self, values: I) -> Result<WizardStep, CoreError>
    where
        I: IntoIterator<Item = (Field, FieldValue)>,
    {
        let values: Vec<(Field, FieldValue)> = values.into_iter().collect();
        if let Some((field, _)) = values
            .iter()
            .find(|(f, _)| f.section().wizard_step() != self.step)
        {
            return Err(CoreError::FieldNotInStep {
                field: field.key(),
                step: self.step.number(),
            });
        }

        let count = values.len();
        self.record.merge(values);
        if self.step == WizardStep::PatientData {
            self.derive_patient_fields();
        }

        debug!(step = self.step.number(), count, "committed step");
        self.apply(Transition::Next);
        Ok(self.step)
    }

    pub fn previous(&mut self) -> WizardStep {
        self.apply(Transition::Previous)
    }

    pub fn jump_to(&mut self, step: WizardStep) -> WizardStep {
        self.apply(Transition::JumpTo(step))
    }

    /// Start a new evaluation.
    pub fn reset(&mut self) -> WizardStep {
        self.apply(Transition::Reset)
    }

    fn apply(&mut self, transition: Transition) -> WizardStep {
        if transition == Transition::Reset {
            info!("starting new evaluation");
            self.record = Record::new();
            self.derived_age = None;
        }
        self.step = self.step.transition(transition);
        self.step
    }

    /// Fill the evaluation date when left out and keep a derived age in step
    /// with the birth date.
    fn derive_patient_fields(&mut self) {
        let evaluation_date = match self.record.get(Field::EvaluationDate) {
            Some(v) if !v.is_blank() => {
                parse_date(&v.to_display_string()).unwrap_or(self.today)
            }
            _ => {
                let formatted = self.today.strftime("%d-%m-%Y").to_string();
                self.record.set(Field::EvaluationDate, formatted);
                self.today
            }
        };

        // An age equal to the one derived earlier is the form echoing it
        // back, not an override.
        let entered_age = self
            .record
            .get(Field::Age)
            .filter(|v| !v.is_blank())
            .map(FieldValue::to_display_string);
        let overridden = match (&entered_age, self.derived_age) {
            (None, _) => false,
            (Some(entered), Some(derived)) => entered.trim() != derived.to_string(),
            (Some(_), None) => true,
        };
        if overridden {
            self.derived_age = None;
            return;
        }

        if let Some(birth) = self
            .record
            .get(Field::BirthDate)
            .and_then(|v| parse_date(&v.to_display_string()))
        {
            let age = age_in_years(birth, evaluation_date);
            debug!(age, "derived age from birth date");
            self.record.set(Field::Age, age);
            self.derived_age = Some(age);
        }
    }
}

/// Parse `DD/MM/YYYY`, `DD-MM-YYYY` or ISO `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Option<Date> {
    let input = input.trim();
    Date::strptime("%d/%m/%Y", input)
        .or_else(|_| Date::strptime("%d-%m-%Y", input))
        .ok()
        .or_else(|| input.parse::<Date>().ok())
}

/// Whole years elapsed from `birth` to `on`.
pub fn age_in_years(birth: Date, on: Date) -> i64 {
    let mut years = i64::from(on.year()) - i64::from(birth.year());
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}
