use evalia_export::metrics::{Font, text_width, wrap_lines};

#[test]
fn bold_is_wider_than_regular() {
    let regular = text_width("Paciente apto", Font::Regular, 10.0);
    let bold = text_width("Paciente apto", Font::Bold, 10.0);
    assert!(bold > regular);
    assert_eq!(text_width("", Font::Regular, 10.0), 0.0);
}

#[test]
fn accented_letters_measure_like_their_base() {
    assert_eq!(
        text_width("Psicóloga", Font::Regular, 10.0),
        text_width("Psicologa", Font::Regular, 10.0)
    );
}

#[test]
fn short_text_stays_on_one_line() {
    assert_eq!(
        wrap_lines("Sin antecedentes relevantes.", Font::Regular, 10.0, 188.0),
        vec!["Sin antecedentes relevantes."]
    );
}

#[test]
fn empty_text_yields_one_empty_line() {
    assert_eq!(wrap_lines("", Font::Regular, 10.0, 188.0), vec![String::new()]);
}

#[test]
fn lines_never_exceed_the_width() {
    let text = "La paciente refiere episodios de ingesta emocional asociados a estrés laboral \
                y dificultades para mantener horarios regulares de alimentación durante la semana.";
    let lines = wrap_lines(text, Font::Regular, 10.0, 60.0);
    assert!(lines.len() > 1);
    for line in &lines {
        assert!(text_width(line, Font::Regular, 10.0) <= 60.0, "{line:?} too wide");
    }
    assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
}

#[test]
fn explicit_newlines_are_kept() {
    let lines = wrap_lines("uno\n\ndos", Font::Regular, 10.0, 188.0);
    assert_eq!(lines, vec!["uno", "", "dos"]);
}

#[test]
fn overlong_word_is_split() {
    let word = "a".repeat(200);
    let lines = wrap_lines(&word, Font::Regular, 10.0, 50.0);
    assert!(lines.len() > 1);
    assert_eq!(lines.concat(), word);
}
