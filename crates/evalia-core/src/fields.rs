//! The fixed set of clinical-intake fields and their static metadata.
//!
//! Every field the wizard captures and the report lays out is declared here
//! exactly once, in [`FIELD_SPECS`]. The table carries the wire key used in
//! the flat record map, the document section the field belongs to, how the
//! layout engine renders it, and the form metadata the wizard uses to prompt
//! for it. Adding a field means adding a variant and a table row; no control
//! flow elsewhere needs to change.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::wizard::WizardStep;

/// One of the nine fixed groupings of the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    PatientData,
    FamilyHistory,
    MorbidHistory,
    MentalHealth,
    SchoolHistory,
    SubstanceUse,
    EatingDisorders,
    Motivation,
    Observations,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::PatientData,
        Section::FamilyHistory,
        Section::MorbidHistory,
        Section::MentalHealth,
        Section::SchoolHistory,
        Section::SubstanceUse,
        Section::EatingDisorders,
        Section::Motivation,
        Section::Observations,
    ];

    /// Heading printed in the report.
    pub fn title(self) -> &'static str {
        match self {
            Section::PatientData => "I. DATOS DEL PACIENTE",
            Section::FamilyHistory => "II. ANTECEDENTES FAMILIARES",
            Section::MorbidHistory => "III. ANTECEDENTES MÓRBIDOS",
            Section::MentalHealth => "IV. ESTADO DE SALUD MENTAL",
            Section::SchoolHistory => "V. HISTORIA ESCOLAR",
            Section::SubstanceUse => "VI. ABUSO O DEPENDENCIAS DE SUSTANCIAS",
            Section::EatingDisorders => "VII. TRASTORNOS DE LA CONDUCTA ALIMENTARIOS",
            Section::Motivation => {
                "VIII. CONSCIENCIA DEL PROBLEMA Y NIVEL DE MOTIVACIÓN PARA EL CAMBIO"
            }
            Section::Observations => "IX. OBSERVACIONES",
        }
    }

    /// The wizard step that captures this section's fields.
    ///
    /// Observations are entered on the motivation step.
    pub fn wizard_step(self) -> WizardStep {
        match self {
            Section::PatientData => WizardStep::PatientData,
            Section::FamilyHistory => WizardStep::FamilyHistory,
            Section::MorbidHistory => WizardStep::MorbidHistory,
            Section::MentalHealth => WizardStep::MentalHealth,
            Section::SchoolHistory => WizardStep::SchoolHistory,
            Section::SubstanceUse => WizardStep::SubstanceUse,
            Section::EatingDisorders => WizardStep::EatingDisorders,
            Section::Motivation | Section::Observations => WizardStep::Motivation,
        }
    }
}

/// How the layout engine renders a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single line, inline with its label, often paired two per row.
    ShortText,
    /// Label on its own line followed by a wrapped paragraph.
    LongText,
    /// Like short text, suffixed with a unit.
    NumericWithUnit { unit: &'static str },
    /// A cell in one of the fixed-column tables.
    Tabular,
}

/// Every known field of the intake record.
///
/// Declaration order matches [`FIELD_SPECS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    // I. Patient data
    FullName,
    Run,
    BirthDate,
    Age,
    Email,
    Phone,
    Address,
    EvaluationDate,
    HealthInsurance,
    Schooling,
    Occupation,
    Sex,
    Psychologist,
    PsychologistRut,
    Procedure,
    ProcedureDate,
    // II. Family history
    NuclearFamily,
    ParentsMaritalStatus,
    MaritalStatus,
    Children,
    SupportNetwork,
    FamilyIllnesses,
    // III. Morbid history
    PerinatalHistory,
    ChildhoodIllnesses,
    CurrentIllnesses,
    Surgeries,
    // IV. Mental health
    MentalHealthHistory,
    MentalHealthStatus,
    // V. School history
    GradeRepetitions,
    GradeRepetitionDetails,
    AcademicPerformance,
    SchoolBehavior,
    // VI. Substance use
    Alcohol,
    AlcoholDetails,
    Tobacco,
    TobaccoDetails,
    Marijuana,
    MarijuanaDetails,
    OtherDrugs,
    OtherDrugsDetails,
    // VII. Eating disorders
    MaxWeight,
    MinWeight,
    IdealWeight,
    Height,
    Arfid,
    EmotionalEater,
    Anorexia,
    NightEater,
    Bulimia,
    Grazer,
    BingeEating,
    FoodCraving,
    // VIII. Motivation
    ProblemOrigins,
    ReasonsToChange,
    FitForProcedure,
    // IX. Observations
    Observations,
}

/// Static metadata for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    /// Key in the flat record map.
    pub key: &'static str,
    pub section: Section,
    pub kind: FieldKind,
    /// Label shown by the wizard when asking for the value.
    pub prompt: &'static str,
    /// Value the wizard pre-fills when nothing has been entered yet.
    pub form_default: Option<&'static str>,
    /// Options offered by selector widgets. Informational only.
    pub choices: &'static [&'static str],
}

const YES_NO: &[&str] = &["No", "Sí"];
const CONSUMPTION: &[&str] = &["No", "Sí", "Ocasionalmente"];
const PERFORMANCE: &[&str] = &["Excelente", "Bueno", "Regular", "Deficiente"];

const fn spec(
    field: Field,
    key: &'static str,
    section: Section,
    kind: FieldKind,
    prompt: &'static str,
) -> FieldSpec {
    FieldSpec {
        field,
        key,
        section,
        kind,
        prompt,
        form_default: None,
        choices: &[],
    }
}

const fn with_default(mut spec: FieldSpec, default: &'static str) -> FieldSpec {
    spec.form_default = Some(default);
    spec
}

const fn with_choices(
    mut spec: FieldSpec,
    default: &'static str,
    choices: &'static [&'static str],
) -> FieldSpec {
    spec.form_default = Some(default);
    spec.choices = choices;
    spec
}

use FieldKind::{LongText, ShortText, Tabular};
use Section as S;

const YEARS: FieldKind = FieldKind::NumericWithUnit { unit: "Años" };
const KG: FieldKind = FieldKind::NumericWithUnit { unit: "kg" };
const METERS: FieldKind = FieldKind::NumericWithUnit { unit: "m" };

/// One row per [`Field`], in report order. Rows stay on one line each.
#[rustfmt::skip]
pub static FIELD_SPECS: [FieldSpec; 56] = [
    spec(Field::FullName, "nombre_completo", S::PatientData, ShortText, "Nombre Completo"),
    spec(Field::Run, "run", S::PatientData, ShortText, "R.U.N."),
    spec(Field::BirthDate, "fecha_nacimiento", S::PatientData, ShortText, "Fecha de Nacimiento (DD/MM/AAAA)"),
    spec(Field::Age, "edad", S::PatientData, YEARS, "Edad (años)"),
    spec(Field::Email, "email", S::PatientData, ShortText, "Email"),
    spec(Field::Phone, "telefono", S::PatientData, ShortText, "Teléfono"),
    spec(Field::Address, "domicilio", S::PatientData, ShortText, "Domicilio"),
    spec(Field::EvaluationDate, "fecha_evaluacion", S::PatientData, ShortText, "Fecha de Evaluación (DD-MM-AAAA)"),
    with_choices(
        spec(Field::HealthInsurance, "prevision", S::PatientData, ShortText, "Previsión"),
        "Fonasa",
        &["Fonasa", "Isapre", "Particular", "Otra"],
    ),
    with_choices(
        spec(Field::Schooling, "escolaridad", S::PatientData, ShortText, "Escolaridad"),
        "Media Completa",
        &[
            "Básica Incompleta",
            "Básica Completa",
            "Media Incompleta",
            "Media Completa",
            "Técnica Incompleta",
            "Técnica Completa",
            "Universitaria Incompleta",
            "Universitaria Completa",
        ],
    ),
    spec(Field::Occupation, "ocupacion", S::PatientData, ShortText, "Profesión/Ocupación"),
    with_choices(
        spec(Field::Sex, "sexo", S::PatientData, ShortText, "Sexo"),
        "Femenino",
        &["Femenino", "Masculino", "No Binario", "Prefiero no decir"],
    ),
    spec(Field::Psychologist, "psicologa", S::PatientData, ShortText, "Psicólogo/a"),
    spec(Field::PsychologistRut, "rut_psicologa", S::PatientData, ShortText, "RUT Psicólogo/a"),
    spec(Field::Procedure, "datos_procedimiento", S::PatientData, ShortText, "Procedimiento y Doctor"),
    with_default(
        spec(Field::ProcedureDate, "fecha_procedimiento", S::PatientData, ShortText, "Fecha/Estado"),
        "En evaluación",
    ),
    spec(Field::NuclearFamily, "familia_nuclear", S::FamilyHistory, ShortText, "Familia Nuclear (composición)"),
    with_choices(
        spec(Field::ParentsMaritalStatus, "situacion_conyugal_padres", S::FamilyHistory, ShortText, "Situación Conyugal de los Padres"),
        "Casados",
        &["Casados", "Separados", "Divorciados", "Viudo/a", "Convivencia", "No Aplica"],
    ),
    with_choices(
        spec(Field::MaritalStatus, "estado_civil", S::FamilyHistory, ShortText, "Estado Civil del Paciente"),
        "Soltero/a",
        &["Soltero/a", "Casado/a", "Divorciado/a", "Viudo/a", "Convivencia"],
    ),
    with_default(
        spec(Field::Children, "hijos", S::FamilyHistory, ShortText, "Número de Hijos"),
        "0",
    ),
    spec(Field::SupportNetwork, "redes_apoyo", S::FamilyHistory, ShortText, "Redes de Apoyo"),
    with_default(
        spec(Field::FamilyIllnesses, "enfermedades_familia", S::FamilyHistory, LongText, "¿Existe alguna enfermedad de importancia en la familia? ¿Trastornos mentales y/o adicciones?"),
        "Sin antecedentes relevantes.",
    ),
    spec(Field::PerinatalHistory, "antecedentes_natales", S::MorbidHistory, LongText, "Antecedentes pre, peri y post natales"),
    with_default(
        spec(Field::ChildhoodIllnesses, "enfermedades_infancia", S::MorbidHistory, LongText, "Enfermedades importantes en la infancia y adolescencia"),
        "Sin antecedentes relevantes.",
    ),
    with_default(
        spec(Field::CurrentIllnesses, "enfermedades_actuales", S::MorbidHistory, LongText, "Enfermedades actuales"),
        "Sin antecedentes relevantes.",
    ),
    spec(Field::Surgeries, "operaciones", S::MorbidHistory, LongText, "Operaciones"),
    with_default(
        spec(Field::MentalHealthHistory, "antecedentes_salud_mental", S::MentalHealth, LongText, "Antecedentes de Salud Mental"),
        "-",
    ),
    with_choices(
        spec(Field::MentalHealthStatus, "estado_salud_mental", S::MentalHealth, ShortText, "Estado de salud mental"),
        "Estable",
        &["Estable", "Inestable", "En tratamiento", "Otro"],
    ),
    with_choices(
        spec(Field::GradeRepetitions, "repitencias", S::SchoolHistory, ShortText, "Repitencias"),
        "No",
        YES_NO,
    ),
    spec(Field::GradeRepetitionDetails, "repitencias_detalles", S::SchoolHistory, LongText, "Detalle las repitencias (cursos, motivos)"),
    with_choices(
        spec(Field::AcademicPerformance, "rendimiento_academico", S::SchoolHistory, ShortText, "Rendimiento Académico"),
        "Excelente",
        PERFORMANCE,
    ),
    with_choices(
        spec(Field::SchoolBehavior, "comportamiento_escolar", S::SchoolHistory, ShortText, "Comportamiento Escolar"),
        "Bueno",
        PERFORMANCE,
    ),
    with_choices(
        spec(Field::Alcohol, "consumo_alcohol", S::SubstanceUse, Tabular, "Alcohol"),
        "Ocasionalmente",
        CONSUMPTION,
    ),
    spec(Field::AlcoholDetails, "detalles_alcohol", S::SubstanceUse, ShortText, "Detalles del consumo de alcohol"),
    with_choices(
        spec(Field::Tobacco, "consumo_tabaco", S::SubstanceUse, Tabular, "Tabaco"),
        "No",
        CONSUMPTION,
    ),
    spec(Field::TobaccoDetails, "detalles_tabaco", S::SubstanceUse, ShortText, "Detalles del consumo de tabaco"),
    with_choices(
        spec(Field::Marijuana, "consumo_marihuana", S::SubstanceUse, Tabular, "Marihuana"),
        "No",
        CONSUMPTION,
    ),
    spec(Field::MarijuanaDetails, "detalles_marihuana", S::SubstanceUse, ShortText, "Detalles del consumo de marihuana"),
    with_choices(
        spec(Field::OtherDrugs, "consumo_otras_drogas", S::SubstanceUse, Tabular, "Otras drogas"),
        "No",
        YES_NO,
    ),
    spec(Field::OtherDrugsDetails, "detalles_otras_drogas", S::SubstanceUse, ShortText, "Especifique otras drogas"),
    with_default(
        spec(Field::MaxWeight, "peso_maximo", S::EatingDisorders, KG, "Peso máximo (kg)"),
        "94.0",
    ),
    with_default(
        spec(Field::MinWeight, "peso_minimo", S::EatingDisorders, KG, "Peso mínimo adulto (kg)"),
        "68.0",
    ),
    with_default(
        spec(Field::IdealWeight, "peso_ideal", S::EatingDisorders, KG, "Peso ideal (kg)"),
        "65.0",
    ),
    with_default(
        spec(Field::Height, "altura", S::EatingDisorders, METERS, "Altura (m)"),
        "1.6",
    ),
    with_choices(spec(Field::Arfid, "arfid", S::EatingDisorders, Tabular, "ARFID"), "No", YES_NO),
    with_choices(
        spec(Field::EmotionalEater, "comedor_emocional", S::EatingDisorders, Tabular, "Comedor Emocional"),
        "No",
        YES_NO,
    ),
    with_choices(
        spec(Field::Anorexia, "anorexia", S::EatingDisorders, Tabular, "Anorexia Nerviosa"),
        "No",
        YES_NO,
    ),
    with_choices(
        spec(Field::NightEater, "comedor_nocturno", S::EatingDisorders, Tabular, "Comedor Nocturno"),
        "No",
        YES_NO,
    ),
    with_choices(
        spec(Field::Bulimia, "bulimia", S::EatingDisorders, Tabular, "Bulimia Nerviosa"),
        "No",
        YES_NO,
    ),
    with_choices(
        spec(Field::Grazer, "picoteador", S::EatingDisorders, Tabular, "Picoteador"),
        "No",
        YES_NO,
    ),
    with_choices(
        spec(Field::BingeEating, "t_atracon", S::EatingDisorders, Tabular, "Trastorno por Atracón"),
        "No",
        YES_NO,
    ),
    with_choices(
        spec(Field::FoodCraving, "food_craving", S::EatingDisorders, Tabular, "Food Craving"),
        "No",
        YES_NO,
    ),
    spec(Field::ProblemOrigins, "factores_origen", S::Motivation, LongText, "Análisis de factores que dieron origen y perpetúan el problema"),
    spec(Field::ReasonsToChange, "razones_cambiar", S::Motivation, LongText, "Razones para cambiar"),
    with_choices(
        spec(Field::FitForProcedure, "paciente_apto", S::Motivation, ShortText, "Paciente apto para procedimiento"),
        "SI, CON SEGUIMIENTO",
        &["SI", "NO", "SI, CON SEGUIMIENTO"],
    ),
    spec(Field::Observations, "observaciones", S::Observations, LongText, "Observaciones"),
];

impl Field {
    /// All known fields in declaration order.
    pub fn all() -> impl Iterator<Item = Field> {
        FIELD_SPECS.iter().map(|s| s.field)
    }

    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_SPECS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn section(self) -> Section {
        self.spec().section
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    /// Look up a field by its record-map key.
    pub fn from_key(key: &str) -> Option<Field> {
        FIELD_SPECS.iter().find(|s| s.key == key).map(|s| s.field)
    }
}

impl std::str::FromStr for Field {
    type Err = CoreError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Field::from_key(key).ok_or_else(|| CoreError::UnknownField(key.to_string()))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
