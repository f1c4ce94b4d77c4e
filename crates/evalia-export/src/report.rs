//! The evaluation report: a fixed sequence of nine sections and a signature.

use evalia_core::rut::format_rut;
use evalia_core::sanitize::sanitize_record;
use evalia_core::{CompletedRecord, Field, Record, Section};
use tracing::info;

use crate::error::ExportError;
use crate::layout::{
    DEFAULT_LABEL_WIDTH, LaidOutDocument, LayoutEngine, PairAnchors, SECTION_MIN_HEIGHT,
};
use crate::pdf::RenderedDocument;
use crate::styles::PageStyle;

pub const REPORT_TITLE: &str = "INFORME PSICOLÓGICO PARA PROCEDIMIENTO BARIÁTRICO";

/// Role caption printed under the signature.
pub const SIGNER_ROLE: &str = "Psicóloga";

const VERDICT_LABEL_WIDTH: f32 = 60.0;
const SUBSTANCE_WIDTHS: &[f32] = &[75.0, 105.0];
const EATING_WIDTHS: &[f32] = &[55.0, 25.0, 55.0, 45.0];

/// Render the record into the finished PDF.
///
/// The record is default-filled and sanitized first; it is never modified.
pub fn render_report(record: &Record) -> Result<RenderedDocument, ExportError> {
    let rendered = layout_report(record, PageStyle::default())?.render()?;
    info!(pages = rendered.page_count, "report rendered");
    Ok(rendered)
}

/// Lay the report out without serializing it.
pub fn layout_report(record: &Record, style: PageStyle) -> Result<LaidOutDocument, ExportError> {
    let mut data = record.complete();
    sanitize_record(&mut data);

    let mut engine = LayoutEngine::new(REPORT_TITLE, style);

    patient_data(&mut engine, &data);
    family_history(&mut engine, &data);

    engine.check_page_break(SECTION_MIN_HEIGHT);
    morbid_history(&mut engine, &data);

    engine.check_page_break(SECTION_MIN_HEIGHT);
    mental_health(&mut engine, &data);

    engine.check_page_break(SECTION_MIN_HEIGHT);
    school_history(&mut engine, &data);

    engine.check_page_break(SECTION_MIN_HEIGHT);
    substance_use(&mut engine, &data)?;

    engine.check_page_break(SECTION_MIN_HEIGHT);
    eating_disorders(&mut engine, &data)?;

    engine.new_page();
    motivation(&mut engine, &data);

    engine.space(5.0);
    observations(&mut engine, &data);

    signature(&mut engine, &data);

    Ok(engine.finish())
}

fn patient_data(engine: &mut LayoutEngine, data: &CompletedRecord) {
    let anchors = PairAnchors::default();
    engine.section_title(Section::PatientData.title());

    engine.field_pair(
        "Nombre:",
        data.get(Field::FullName),
        "RUN:",
        &format_rut(data.get(Field::Run)),
        &anchors,
    );
    engine.field_pair(
        "F. Nac.:",
        data.get(Field::BirthDate),
        "Edad:",
        &data.with_unit(Field::Age),
        &anchors,
    );
    engine.field_pair(
        "Email:",
        data.get(Field::Email),
        "Teléfono:",
        data.get(Field::Phone),
        &anchors,
    );
    engine.field("Domicilio:", data.get(Field::Address), DEFAULT_LABEL_WIDTH);
    engine.field_pair(
        "Previsión:",
        data.get(Field::HealthInsurance),
        "Escolaridad:",
        data.get(Field::Schooling),
        &anchors,
    );
    engine.field_pair(
        "Profesión:",
        data.get(Field::Occupation),
        "Sexo:",
        data.get(Field::Sex),
        &anchors,
    );
    engine.field("Psicóloga:", data.get(Field::Psychologist), DEFAULT_LABEL_WIDTH);
    engine.field_pair(
        "Procedimiento:",
        data.get(Field::Procedure),
        "Fecha:",
        data.get(Field::ProcedureDate),
        &anchors,
    );
}

fn family_history(engine: &mut LayoutEngine, data: &CompletedRecord) {
    let anchors = PairAnchors::default();
    engine.section_title(Section::FamilyHistory.title());

    engine.field("Familia Nuclear:", data.get(Field::NuclearFamily), DEFAULT_LABEL_WIDTH);
    engine.field_pair(
        "Estado Civil Padres:",
        data.get(Field::ParentsMaritalStatus),
        "Estado Civil:",
        data.get(Field::MaritalStatus),
        &anchors,
    );
    engine.field_pair(
        "Hijos:",
        data.get(Field::Children),
        "Redes de Apoyo:",
        data.get(Field::SupportNetwork),
        &anchors,
    );
    engine.long_field(
        "Enfermedades de importancia/Trastornos mentales/Adicciones familiares:",
        data.get(Field::FamilyIllnesses),
    );
}

fn morbid_history(engine: &mut LayoutEngine, data: &CompletedRecord) {
    engine.section_title(Section::MorbidHistory.title());

    engine.long_field(
        "Antecedentes pre, peri y post natales:",
        data.get(Field::PerinatalHistory),
    );
    engine.long_field(
        "Enfermedades importantes en infancia y adolescencia:",
        data.get(Field::ChildhoodIllnesses),
    );
    engine.long_field("Enfermedades actuales:", data.get(Field::CurrentIllnesses));
    engine.long_field("Operaciones:", data.get(Field::Surgeries));
}

fn mental_health(engine: &mut LayoutEngine, data: &CompletedRecord) {
    engine.section_title(Section::MentalHealth.title());

    engine.long_field(
        "Antecedentes de Salud Mental:",
        data.get(Field::MentalHealthHistory),
    );
    engine.field(
        "Estado de salud mental:",
        data.get(Field::MentalHealthStatus),
        DEFAULT_LABEL_WIDTH,
    );
}

fn school_history(engine: &mut LayoutEngine, data: &CompletedRecord) {
    engine.section_title(Section::SchoolHistory.title());

    // "Rendimiento Académico:" needs a wider second label column.
    let anchors = PairAnchors {
        label2_x: 90.0,
        value2_x: 135.0,
        ..PairAnchors::default()
    };
    engine.field_pair(
        "Repitencias:",
        data.get(Field::GradeRepetitions),
        "Rendimiento Académico:",
        data.get(Field::AcademicPerformance),
        &anchors,
    );
    engine.field(
        "Comportamiento Escolar:",
        data.get(Field::SchoolBehavior),
        DEFAULT_LABEL_WIDTH,
    );
}

fn substance_use(engine: &mut LayoutEngine, data: &CompletedRecord) -> Result<(), ExportError> {
    engine.section_title(Section::SubstanceUse.title());

    let rows: Vec<Vec<String>> = [
        ("Alcohol", Field::Alcohol),
        ("Tabaco", Field::Tobacco),
        ("Marihuana", Field::Marijuana),
        ("Otras drogas", Field::OtherDrugs),
    ]
    .into_iter()
    .map(|(name, field)| vec![name.to_string(), data.get(field).to_string()])
    .collect();

    engine.table(&["Sustancia", "Consumo"], &rows, Some(SUBSTANCE_WIDTHS))
}

fn eating_disorders(engine: &mut LayoutEngine, data: &CompletedRecord) -> Result<(), ExportError> {
    let anchors = PairAnchors::default();
    engine.section_title(Section::EatingDisorders.title());

    engine.field_pair(
        "Peso máximo:",
        &data.with_unit(Field::MaxWeight),
        "Peso mínimo:",
        &data.with_unit(Field::MinWeight),
        &anchors,
    );
    engine.field_pair(
        "Peso ideal:",
        &data.with_unit(Field::IdealWeight),
        "Altura:",
        &data.with_unit(Field::Height),
        &anchors,
    );
    engine.space(4.0);

    let pairs = [
        (("ARFID", Field::Arfid), ("Comedor Emocional", Field::EmotionalEater)),
        (("Anorexia Nerviosa", Field::Anorexia), ("Comedor Nocturno", Field::NightEater)),
        (("Bulimia Nerviosa", Field::Bulimia), ("Picoteador", Field::Grazer)),
        (("Trastorno por Atracón", Field::BingeEating), ("Food Craving", Field::FoodCraving)),
    ];
    let rows: Vec<Vec<String>> = pairs
        .into_iter()
        .map(|((left, left_field), (right, right_field))| {
            vec![
                left.to_string(),
                data.get(left_field).to_string(),
                right.to_string(),
                data.get(right_field).to_string(),
            ]
        })
        .collect();

    engine.table(
        &["Trastorno", "Estado", "Trastorno", "Estado"],
        &rows,
        Some(EATING_WIDTHS),
    )
}

fn motivation(engine: &mut LayoutEngine, data: &CompletedRecord) {
    engine.section_title(Section::Motivation.title());

    engine.long_field(
        "Análisis de factores que dieron origen y perpetúan el problema:",
        data.get(Field::ProblemOrigins),
    );
    engine.long_field("Razones para cambiar:", data.get(Field::ReasonsToChange));
    engine.emphasized_field(
        "Paciente apto para procedimiento:",
        data.get(Field::FitForProcedure),
        VERDICT_LABEL_WIDTH,
    );
}

fn observations(engine: &mut LayoutEngine, data: &CompletedRecord) {
    engine.section_title(Section::Observations.title());
    engine.paragraph(data.get(Field::Observations));
}

fn signature(engine: &mut LayoutEngine, data: &CompletedRecord) {
    let rut = format_rut(data.get(Field::PsychologistRut));
    let identifier = if rut.is_empty() {
        "Rut:".to_string()
    } else {
        format!("Rut: {rut}")
    };
    engine.signature_block(data.get(Field::Psychologist), &identifier, SIGNER_ROLE);
}
