use crate::core::knowledge::KnowledgeBase;
use crate::domain::model::{
    CycleMeaning, HandPhoto, Interpretation, LineName, LineReading, OraclePayload, ShapeLabel,
};

pub const UNKNOWN_SHAPE_TEXT: &str = "Forma no identificada claramente";
pub const LINE_NOT_DETECTED: &str = "No detectada";
pub const CYCLE_UNAVAILABLE: &str = "Información no disponible";

/// Assembles the displayable interpretation from the analysis outputs and the
/// knowledge base. Pure template substitution with defaults; no branching
/// beyond lookups. Always produces a complete record, never a partial one.
pub fn compose(
    shape: ShapeLabel,
    lines: Option<&LineReading>,
    personal_year: u8,
    knowledge: &KnowledgeBase,
) -> Interpretation {
    let personality = knowledge
        .shape_profile(shape)
        .map(|profile| profile.personality.as_str())
        .unwrap_or(UNKNOWN_SHAPE_TEXT);

    let cycle = knowledge
        .cycle(personal_year)
        .cloned()
        .unwrap_or_else(|| CycleMeaning {
            name: CYCLE_UNAVAILABLE.to_string(),
            description: String::new(),
            advice: String::new(),
        });

    let line_text = |name: LineName| -> String {
        match lines {
            Some(reading) => reading.get(name).to_string(),
            None => LINE_NOT_DETECTED.to_string(),
        }
    };

    let narrative_text = format!(
        "**Forma de Mano:** {shape}\n\
         {personality}\n\
         \n\
         **Líneas Principales:**\n\
         - Línea de Vida: {life}\n\
         - Línea de Cabeza: {head}\n\
         - Línea de Corazón: {heart}\n\
         - Línea de Destino: {destiny}\n\
         \n\
         **Ciclo Vital Actual (Año {personal_year}):**\n\
         {cycle_name}\n\
         \n\
         {cycle_description}\n\
         \n\
         **Recomendaciones para este ciclo:**\n\
         {cycle_advice}\n",
        shape = capitalize(&shape.to_string()),
        personality = personality,
        life = line_text(LineName::Life),
        head = line_text(LineName::Head),
        heart = line_text(LineName::Heart),
        destiny = line_text(LineName::Destiny),
        personal_year = personal_year,
        cycle_name = cycle.name,
        cycle_description = cycle.description,
        cycle_advice = cycle.advice,
    );

    Interpretation {
        shape,
        lines: lines.copied(),
        cycle,
        narrative_text,
    }
}

/// Builds the request payload for the external generative model: the "Elara"
/// instruction text parameterized by question and cycle, plus every supplied
/// photo as an inline attachment in upload order. The composer only prepares
/// the payload; the oracle adapter owns the actual call.
pub fn build_payload(
    question: &str,
    personal_year: u8,
    knowledge: &KnowledgeBase,
    photos: &[HandPhoto],
) -> OraclePayload {
    let cycle_summary = knowledge
        .cycle(personal_year)
        .map(|cycle| format!("{}: {}", cycle.name, cycle.description))
        .unwrap_or_else(|| CYCLE_UNAVAILABLE.to_string());

    let instruction_text = format!(
        "Eres una consultora esotérica experta llamada 'Elara, la Observadora de Estrellas'.\n\
         Usa numerología y lectura de manos para ofrecer una guía sabia, empática y empoderadora.\n\
         \n\
         Pregunta del usuario: \"{question}\"\n\
         Año personal: {personal_year} ({cycle_summary})\n\
         \n\
         Analiza también las imágenes de las manos del usuario siguiendo estos principios:\n\
         - Forma de la mano y dedos\n\
         - Líneas principales (vida, cabeza, corazón, destino)\n\
         - Líneas débiles, fuertes, rotas\n\
         - Símbolos presentes\n\
         - Montes de la palma\n\
         \n\
         Entrega la lectura en formato **Markdown** y usa tablas cuando hables de ciclos o periodos.\n\
         No hagas predicciones absolutas, solo guía.\n",
    );

    OraclePayload {
        instruction_text,
        attachments: photos.to_vec(),
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LinePresence;

    fn full_reading() -> LineReading {
        LineReading {
            life: LinePresence::Present,
            head: LinePresence::Present,
            heart: LinePresence::Present,
            destiny: LinePresence::Absent,
        }
    }

    #[test]
    fn test_narrative_contains_knowledge_texts_verbatim() {
        let kb = KnowledgeBase::new();
        let reading = full_reading();
        let interpretation = compose(ShapeLabel::Square, Some(&reading), 6, &kb);

        let personality = &kb.shape_profile(ShapeLabel::Square).unwrap().personality;
        let cycle = kb.cycle(6).unwrap();

        assert!(interpretation.narrative_text.contains("**Forma de Mano:** Cuadrada"));
        assert!(interpretation.narrative_text.contains(personality.as_str()));
        assert!(interpretation.narrative_text.contains(&cycle.name));
        assert!(interpretation.narrative_text.contains(&cycle.description));
        assert!(interpretation.narrative_text.contains(&cycle.advice));
        assert!(interpretation.narrative_text.contains("- Línea de Vida: presente"));
        assert!(interpretation.narrative_text.contains("- Línea de Destino: ausente"));
        assert_eq!(interpretation.shape, ShapeLabel::Square);
        assert_eq!(interpretation.lines, Some(reading));
        assert_eq!(interpretation.cycle, *cycle);
    }

    #[test]
    fn test_unknown_shape_falls_back_to_default_text() {
        let kb = KnowledgeBase::new();
        for label in [ShapeLabel::Indeterminate, ShapeLabel::Error] {
            let interpretation = compose(label, Some(&full_reading()), 3, &kb);
            assert!(interpretation.narrative_text.contains(UNKNOWN_SHAPE_TEXT));
        }
    }

    #[test]
    fn test_missing_lines_reported_as_not_detected() {
        let kb = KnowledgeBase::new();
        let interpretation = compose(ShapeLabel::Conic, None, 1, &kb);
        assert!(interpretation
            .narrative_text
            .contains(&format!("- Línea de Vida: {}", LINE_NOT_DETECTED)));
        assert!(interpretation
            .narrative_text
            .contains(&format!("- Línea de Destino: {}", LINE_NOT_DETECTED)));
        assert_eq!(interpretation.lines, None);
    }

    #[test]
    fn test_out_of_range_year_is_defensive() {
        let kb = KnowledgeBase::new();
        let interpretation = compose(ShapeLabel::Square, Some(&full_reading()), 0, &kb);
        assert_eq!(interpretation.cycle.name, CYCLE_UNAVAILABLE);
        assert!(interpretation.narrative_text.contains(CYCLE_UNAVAILABLE));
    }

    #[test]
    fn test_payload_contains_question_and_cycle() {
        let kb = KnowledgeBase::new();
        let photos = vec![
            HandPhoto::new(vec![1, 2, 3], "image/jpeg"),
            HandPhoto::new(vec![4, 5], "image/png"),
        ];
        let payload = build_payload("¿Cómo me irá en mi carrera?", 8, &kb, &photos);

        assert!(payload.instruction_text.contains("¿Cómo me irá en mi carrera?"));
        assert!(payload.instruction_text.contains("Año personal: 8"));
        assert!(payload.instruction_text.contains("Año de Poder"));
        assert!(payload.instruction_text.contains("Elara"));
        assert_eq!(payload.attachments.len(), 2);
        assert_eq!(payload.attachments[0].mime_type, "image/jpeg");
        assert_eq!(payload.attachments[1].bytes, vec![4, 5]);
    }
}
