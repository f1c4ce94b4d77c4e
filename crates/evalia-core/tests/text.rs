use evalia_core::Field;
use evalia_core::rut::format_rut;
use evalia_core::sanitize::{clean_text, is_sanitized, sanitize_record, strip_boilerplate};
use evalia_core::Record;

#[test]
fn rut_is_grouped_with_check_digit() {
    assert_eq!(format_rut("123456785"), "12.345.678-5");
    assert_eq!(format_rut("7654321k"), "7.654.321-K");
    assert_eq!(format_rut("  98765432-1 "), "98.765.432-1");
}

#[test]
fn rut_formatting_is_idempotent() {
    for raw in ["123456785", "12.345.678-5", "1-9", "1234", "7654321K"] {
        let once = format_rut(raw);
        assert_eq!(format_rut(&once), once, "not idempotent for {raw:?}");
    }
}

#[test]
fn rut_degrades_on_short_input() {
    assert_eq!(format_rut(""), "");
    assert_eq!(format_rut("   "), "");
    assert_eq!(format_rut("5"), "");
    assert_eq!(format_rut("5-"), "5");
    assert_eq!(format_rut("15"), "1-5");
}

#[test]
fn boilerplate_is_removed_and_trimmed() {
    assert_eq!(
        strip_boilerplate("Aquí está el texto corregido y mejorado: Paciente estable."),
        "Paciente estable."
    );
    assert_eq!(
        strip_boilerplate(
            "Informe Psicológico\nLa redacción es más clara. Paciente colaboradora. Informe Psicológico"
        ),
        ". Paciente colaboradora."
    );
}

#[test]
fn empty_sanitized_field_gets_placeholder() {
    assert_eq!(
        clean_text(Field::ReasonsToChange, ""),
        "Mejorar calidad de vida y estado de salud general."
    );
    assert_eq!(
        clean_text(Field::Observations, "  Aquí está el texto corregido y mejorado:  "),
        "Sin observaciones relevantes que destacar."
    );
}

#[test]
fn non_sanitized_field_stays_empty() {
    assert!(!is_sanitized(Field::Surgeries));
    assert_eq!(clean_text(Field::Surgeries, "   "), "");
}

#[test]
fn sanitize_record_touches_only_prose_fields() {
    let mut record = Record::new();
    record.set(Field::ProblemOrigins, "Esta versión reformulada Ansiedad y sedentarismo.");
    record.set(Field::FullName, "Informe Psicológico");
    let mut completed = record.complete();

    sanitize_record(&mut completed);

    assert_eq!(completed.get(Field::ProblemOrigins), "Ansiedad y sedentarismo.");
    assert_eq!(completed.get(Field::PerinatalHistory), "Sin antecedentes relevantes.");
    assert_eq!(completed.get(Field::FullName), "Informe Psicológico");
}
