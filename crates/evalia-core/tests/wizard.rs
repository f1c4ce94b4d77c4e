use evalia_core::error::CoreError;
use evalia_core::wizard::{Transition, Wizard, WizardStep, age_in_years, parse_date};
use evalia_core::{Field, FieldValue};
use jiff::civil::date;

fn wizard() -> Wizard {
    Wizard::with_today(date(2025, 2, 14))
}

#[test]
fn transitions_are_bounded() {
    assert_eq!(
        WizardStep::PatientData.transition(Transition::Previous),
        WizardStep::PatientData
    );
    assert_eq!(WizardStep::Review.transition(Transition::Next), WizardStep::Review);
    assert_eq!(
        WizardStep::SchoolHistory.transition(Transition::Next),
        WizardStep::SubstanceUse
    );
    assert_eq!(
        WizardStep::Motivation.transition(Transition::Reset),
        WizardStep::PatientData
    );
    assert_eq!(WizardStep::from_number(0), None);
    assert_eq!(WizardStep::from_number(9), Some(WizardStep::Review));
}

#[test]
fn every_field_belongs_to_exactly_one_step() {
    let total: usize = WizardStep::ALL.iter().map(|s| s.fields().count()).sum();
    assert_eq!(total, Field::all().count());
    assert_eq!(WizardStep::Review.fields().count(), 0);
    assert!(WizardStep::Motivation.fields().any(|f| f == Field::Observations));
}

#[test]
fn next_commits_and_advances() {
    let mut w = wizard();
    let step = w
        .next([
            (Field::FullName, FieldValue::from("Ana Pérez")),
            (Field::BirthDate, FieldValue::from("25/05/1982")),
        ])
        .expect("patient fields belong to step 1");

    assert_eq!(step, WizardStep::FamilyHistory);
    assert_eq!(w.record().text(Field::FullName), "Ana Pérez");
    assert_eq!(w.record().get(Field::Age), Some(&FieldValue::Integer(42)));
    assert_eq!(w.record().text(Field::EvaluationDate), "14-02-2025");
}

#[test]
fn explicit_age_is_not_overwritten() {
    let mut w = wizard();
    w.next([
        (Field::BirthDate, FieldValue::from("1982-05-25")),
        (Field::Age, FieldValue::from(30_i64)),
    ])
    .expect("commit");
    assert_eq!(w.record().get(Field::Age), Some(&FieldValue::Integer(30)));
}

#[test]
fn foreign_field_is_rejected_without_commit() {
    let mut w = wizard();
    let err = w
        .next([
            (Field::FullName, FieldValue::from("Ana")),
            (Field::Observations, FieldValue::from("fuera de lugar")),
        ])
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::FieldNotInStep { field: "observaciones", step: 1 }
    ));
    assert_eq!(w.step(), WizardStep::PatientData);
    assert!(w.record().is_empty());
}

#[test]
fn navigation_does_not_lose_values() {
    let mut w = wizard();
    w.next([(Field::FullName, FieldValue::from("Ana"))]).expect("step 1");
    w.next([(Field::Children, FieldValue::from(2_i64))]).expect("step 2");
    assert_eq!(w.previous(), WizardStep::FamilyHistory);
    assert_eq!(w.form_value(Field::Children), "2");
    assert_eq!(w.form_value(Field::SupportNetwork), "");
    assert_eq!(w.form_value(Field::FamilyIllnesses), "Sin antecedentes relevantes.");

    assert_eq!(w.jump_to(WizardStep::Review), WizardStep::Review);
    assert_eq!(w.record().text(Field::FullName), "Ana");
}

#[test]
fn reset_discards_the_record() {
    let mut w = wizard();
    w.next([(Field::FullName, FieldValue::from("Ana"))]).expect("step 1");
    assert_eq!(w.reset(), WizardStep::PatientData);
    assert!(w.record().is_empty());
}

#[test]
fn age_counts_whole_years() {
    let birth = parse_date("25/05/1982").expect("parses");
    assert_eq!(age_in_years(birth, date(2025, 5, 24)), 42);
    assert_eq!(age_in_years(birth, date(2025, 5, 25)), 43);
    assert_eq!(parse_date("no es fecha"), None);
}

#[test]
fn derived_age_follows_a_corrected_birth_date() {
    let mut w = Wizard::with_today(date(2026, 10, 16));
    w.next([(Field::BirthDate, FieldValue::from("01/01/1990"))])
        .expect("step 1");
    assert_eq!(w.record().get(Field::Age), Some(&FieldValue::Integer(36)));

    assert_eq!(w.previous(), WizardStep::PatientData);
    let shown_age = w.form_value(Field::Age);
    w.next([
        (Field::BirthDate, FieldValue::from("01/01/2000")),
        (Field::Age, FieldValue::from(shown_age)),
    ])
    .expect("step 1 again");
    assert_eq!(w.record().get(Field::Age), Some(&FieldValue::Integer(26)));
}

#[test]
fn typed_age_override_survives_recommit() {
    let mut w = Wizard::with_today(date(2026, 10, 16));
    w.next([(Field::BirthDate, FieldValue::from("01/01/1990"))])
        .expect("step 1");
    w.previous();
    w.next([
        (Field::BirthDate, FieldValue::from("01/01/1990")),
        (Field::Age, FieldValue::from(40_i64)),
    ])
    .expect("override");
    assert_eq!(w.record().get(Field::Age), Some(&FieldValue::Integer(40)));
}
