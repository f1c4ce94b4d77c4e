use evalia_core::{Field, FieldValue, Record, Section};
use evalia_export::report::{REPORT_TITLE, layout_report, render_report};
use evalia_export::{ExportError, LaidOutDocument, PageStyle};

fn full_record() -> Record {
    let mut record = Record::new();
    record.set(Field::FullName, "María José Fuentes");
    record.set(Field::Run, "123456785");
    record.set(Field::BirthDate, "14/02/1983");
    record.set(Field::Age, 42_i64);
    record.set(Field::Email, "mfuentes@example.cl");
    record.set(Field::Phone, "+56 9 1234 5678");
    record.set(Field::Address, "Av. Providencia 1234, Santiago");
    record.set(Field::HealthInsurance, "Fonasa");
    record.set(Field::Schooling, "Universitaria completa");
    record.set(Field::Occupation, "Contadora");
    record.set(Field::Sex, "Femenino");
    record.set(Field::Psychologist, "Ana Pérez Soto");
    record.set(Field::PsychologistRut, "111111111");
    record.set(Field::Procedure, "Manga gástrica");
    record.set(Field::ProcedureDate, "10/03/2025");
    record.set(Field::NuclearFamily, "Esposo y dos hijos");
    record.set(Field::FamilyIllnesses, "Madre con diabetes tipo 2.");
    record.set(Field::PerinatalHistory, "Parto de término sin complicaciones.");
    record.set(Field::MentalHealthHistory, "Sin tratamientos previos.");
    record.set(Field::MentalHealthStatus, "Estable");
    record.set(Field::AcademicPerformance, "Bueno");
    record.set(Field::Alcohol, "Ocasional");
    record.set(Field::Tobacco, "No");
    record.set(Field::MaxWeight, 112.5);
    record.set(Field::MinWeight, 70.0);
    record.set(Field::IdealWeight, 68.0);
    record.set(Field::Height, 1.6);
    record.set(Field::EmotionalEater, "Presente");
    record.set(
        Field::ProblemOrigins,
        "Aquí está el texto corregido y mejorado: Ingesta emocional asociada a estrés.",
    );
    record.set(Field::ReasonsToChange, "Mejorar su salud.");
    record.set(Field::FitForProcedure, "Sí");
    record.set(Field::Observations, "Informe Psicológico");
    record
}

fn texts(doc: &LaidOutDocument) -> Vec<String> {
    doc.pages
        .iter()
        .flat_map(|p| p.texts().map(str::to_string))
        .collect()
}

fn page_of(doc: &LaidOutDocument, text: &str) -> usize {
    doc.pages
        .iter()
        .find(|p| p.texts().any(|t| t == text))
        .map(|p| p.number)
        .unwrap_or_else(|| panic!("{text:?} not laid out"))
}

#[test]
fn sections_appear_in_order() {
    let doc = layout_report(&full_record(), PageStyle::default()).unwrap();
    let texts = texts(&doc);

    assert_eq!(texts[0], REPORT_TITLE);
    let positions: Vec<usize> = Section::ALL
        .iter()
        .map(|s| {
            texts
                .iter()
                .position(|t| t == s.title())
                .unwrap_or_else(|| panic!("missing {}", s.title()))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn motivation_starts_a_new_page() {
    let doc = layout_report(&full_record(), PageStyle::default()).unwrap();

    assert!(doc.page_count() >= 2);
    let motivation = page_of(&doc, Section::Motivation.title());
    let eating = page_of(&doc, Section::EatingDisorders.title());
    assert!(motivation > eating);

    let first = doc.pages[motivation - 1].texts().next();
    assert_eq!(first, Some(Section::Motivation.title()));
}

#[test]
fn identifiers_and_units_are_formatted() {
    let doc = layout_report(&full_record(), PageStyle::default()).unwrap();
    let texts = texts(&doc);

    assert!(texts.contains(&" 12.345.678-5".to_string()));
    assert!(texts.contains(&" 42 Años".to_string()));
    assert!(texts.contains(&" 112.5 kg".to_string()));
    assert!(texts.contains(&" 70.0 kg".to_string()));
    assert!(texts.contains(&" 1.6 m".to_string()));
    assert!(texts.contains(&"Rut: 11.111.111-1".to_string()));
}

#[test]
fn prose_fields_are_sanitized() {
    let doc = layout_report(&full_record(), PageStyle::default()).unwrap();
    let texts = texts(&doc);

    assert!(texts.contains(&"Ingesta emocional asociada a estrés.".to_string()));
    assert!(!texts.iter().any(|t| t.contains("Aquí está el texto")));
    assert!(texts.contains(&"Sin observaciones relevantes que destacar.".to_string()));
    assert!(!texts.contains(&"Sin antecedentes relevantes.".to_string()));
}

#[test]
fn substance_table_lists_every_substance() {
    let doc = layout_report(&full_record(), PageStyle::default()).unwrap();
    let texts = texts(&doc);

    for name in ["Sustancia", "Consumo", "Alcohol", "Tabaco", "Marihuana", "Otras drogas"] {
        assert!(texts.iter().any(|t| t == name), "missing {name}");
    }
    assert!(texts.contains(&"Ocasional".to_string()));
}

#[test]
fn signature_closes_the_report() {
    let doc = layout_report(&full_record(), PageStyle::default()).unwrap();
    let last = doc.pages.last().unwrap();
    let texts: Vec<&str> = last.texts().collect();

    let name = texts.iter().rposition(|t| *t == "Ana Pérez Soto").unwrap();
    assert_eq!(texts[name + 1], "Rut: 11.111.111-1");
    assert_eq!(texts[name + 2], "Psicóloga");
}

#[test]
fn empty_record_renders_with_placeholders() {
    let doc = layout_report(&Record::new(), PageStyle::default()).unwrap();
    let texts = texts(&doc);

    assert!(texts.contains(&"Sin antecedentes relevantes.".to_string()));
    assert!(texts.contains(&"Mejorar calidad de vida y estado de salud general.".to_string()));
    assert!(texts.contains(&"Rut:".to_string()));
    assert!(texts.contains(&"Psicóloga".to_string()));
}

#[test]
fn unknown_keys_are_ignored() {
    let mut record = full_record();
    record.set_key("campo_desconocido", "no debe aparecer");
    let doc = layout_report(&record, PageStyle::default()).unwrap();
    assert!(!texts(&doc).iter().any(|t| t.contains("no debe aparecer")));
}

#[test]
fn render_produces_pdf_bytes() {
    let record = full_record();
    let before = record.clone();
    let rendered = render_report(&record).unwrap();

    assert!(rendered.bytes.starts_with(b"%PDF"));
    assert!(rendered.page_count >= 2);
    assert_eq!(record, before);
}

#[test]
fn unencodable_text_fails_the_whole_render() {
    let mut record = full_record();
    record.set(Field::Observations, FieldValue::from("Paciente motivada 🙂"));

    let err = render_report(&record).unwrap_err();
    match err {
        ExportError::Unencodable { character, .. } => assert_eq!(character, '🙂'),
        other => panic!("unexpected error: {other}"),
    }
}
