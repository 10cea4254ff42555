use crate::domain::model::{CycleMeaning, LineName, ShapeLabel};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Personality profile attached to a hand-shape archetype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeProfile {
    pub description: String,
    pub features: String,
    pub personality: String,
}

/// Static palmistry/numerology tables. Built once at process start and shared
/// read-only across all requests; never mutated afterwards.
#[derive(Debug)]
pub struct KnowledgeBase {
    shapes: HashMap<ShapeLabel, ShapeProfile>,
    line_meanings: HashMap<LineName, HashMap<&'static str, &'static str>>,
    mounts: HashMap<&'static str, &'static str>,
    signs: HashMap<&'static str, &'static str>,
    cycles: HashMap<u8, CycleMeaning>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self {
            shapes: shape_profiles(),
            line_meanings: line_meanings(),
            mounts: mount_meanings(),
            signs: sign_meanings(),
            cycles: cycle_meanings(),
        }
    }

    /// Process-wide shared instance.
    pub fn global() -> &'static KnowledgeBase {
        static KNOWLEDGE: OnceLock<KnowledgeBase> = OnceLock::new();
        KNOWLEDGE.get_or_init(KnowledgeBase::new)
    }

    /// Only the four real archetypes have profiles; `Indeterminate` and
    /// `Error` miss so the composer falls back to its default text.
    pub fn shape_profile(&self, label: ShapeLabel) -> Option<&ShapeProfile> {
        self.shapes.get(&label)
    }

    pub fn line_meaning(&self, line: LineName, variant: &str) -> Option<&'static str> {
        self.line_meanings
            .get(&line)
            .and_then(|variants| variants.get(variant))
            .copied()
    }

    pub fn mount_meaning(&self, mount: &str) -> Option<&'static str> {
        self.mounts.get(mount).copied()
    }

    pub fn sign_meaning(&self, sign: &str) -> Option<&'static str> {
        self.signs.get(sign).copied()
    }

    pub fn cycle(&self, personal_year: u8) -> Option<&CycleMeaning> {
        self.cycles.get(&personal_year)
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

fn profile(description: &str, features: &str, personality: &str) -> ShapeProfile {
    ShapeProfile {
        description: description.to_string(),
        features: features.to_string(),
        personality: personality.to_string(),
    }
}

fn shape_profiles() -> HashMap<ShapeLabel, ShapeProfile> {
    let mut shapes = HashMap::new();
    shapes.insert(
        ShapeLabel::Square,
        profile(
            "Mano práctica y lógica",
            "Palma cuadrada, dedos de longitud similar a la palma",
            "Persona práctica, metódica, confiable. Prefiere la estabilidad y el orden.",
        ),
    );
    shapes.insert(
        ShapeLabel::Conic,
        profile(
            "Mano artística e intuitiva",
            "Palma ovalada, dedos que se estrechan hacia las puntas",
            "Persona creativa, intuitiva, emocional. Busca belleza y armonía.",
        ),
    );
    shapes.insert(
        ShapeLabel::Philosophic,
        profile(
            "Mano intelectual",
            "Palma rectangular, dedos largos y nudosos",
            "Persona analítica, filosófica, busca conocimiento profundo.",
        ),
    );
    shapes.insert(
        ShapeLabel::Spatulate,
        profile(
            "Mano de acción",
            "Dedos que se ensanchan en las puntas",
            "Persona activa, enérgica, práctica. Le gusta la acción directa.",
        ),
    );
    shapes
}

fn line_meanings() -> HashMap<LineName, HashMap<&'static str, &'static str>> {
    let mut lines = HashMap::new();
    lines.insert(
        LineName::Life,
        HashMap::from([
            (
                "larga",
                "Gran vitalidad y energía. Vida longeva si se cuida la salud.",
            ),
            (
                "corta",
                "No indica vida corta, sino intensidad. Enfoque en calidad sobre cantidad.",
            ),
            ("profunda", "Energía vital fuerte, resistencia física."),
            ("fragmentada", "Cambios importantes en el estilo de vida."),
        ]),
    );
    lines.insert(
        LineName::Head,
        HashMap::from([
            ("larga", "Pensamiento analítico, atención al detalle."),
            ("corta", "Decisiones rápidas, pensamiento directo."),
            ("recta", "Pensamiento lógico y práctico."),
            ("curva", "Imaginación, creatividad, pensamiento lateral."),
        ]),
    );
    lines.insert(
        LineName::Heart,
        HashMap::from([
            ("larga", "Emociones profundas, relaciones duraderas."),
            ("corta", "Enfoque más cerebral que emocional."),
            ("profunda", "Pasión intensa en relaciones."),
            ("fragmentada", "Experiencias emocionales variadas."),
        ]),
    );
    lines.insert(
        LineName::Destiny,
        HashMap::from([
            ("presente", "Sentido claro de propósito y dirección."),
            ("ausente", "Libertad para crear su propio camino."),
            ("fuerte", "Influencias externas marcan el camino."),
            ("debil", "Mayor control personal del destino."),
        ]),
    );
    lines
}

fn mount_meanings() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("venus", "Amor, pasión, vitalidad física"),
        ("jupiter", "Ambición, liderazgo, confianza"),
        ("saturno", "Responsabilidad, disciplina, sabiduría"),
        ("apolo", "Creatividad, arte, éxito"),
        ("mercurio", "Comunicación, negocios, adaptabilidad"),
        ("luna", "Imaginación, intuición, emociones"),
        ("marte", "Energía, coraje, determinación"),
    ])
}

fn sign_meanings() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("estrella", "Evento significativo, éxito o cambio dramático"),
        ("cruz", "Obstáculo superado o protección espiritual"),
        ("triangulo", "Talento especial o habilidad mental"),
        ("cuadrado", "Protección ante adversidades"),
        ("isla", "Periodo de dificultad o confusión temporal"),
    ])
}

fn cycle(name: &str, description: &str, advice: &str) -> CycleMeaning {
    CycleMeaning {
        name: name.to_string(),
        description: description.to_string(),
        advice: advice.to_string(),
    }
}

fn cycle_meanings() -> HashMap<u8, CycleMeaning> {
    HashMap::from([
        (
            1,
            cycle(
                "Año de Inicios",
                "Tiempo de nuevos comienzos, iniciativa personal, independencia",
                "Toma la iniciativa, confía en ti, empieza proyectos nuevos",
            ),
        ),
        (
            2,
            cycle(
                "Año de Cooperación",
                "Relaciones, diplomacia, asociaciones, paciencia",
                "Trabaja en equipo, cultiva relaciones, sé diplomático",
            ),
        ),
        (
            3,
            cycle(
                "Año de Expresión",
                "Creatividad, comunicación, alegría, socialización",
                "Expresa tu creatividad, comunícate, disfruta la vida social",
            ),
        ),
        (
            4,
            cycle(
                "Año de Construcción",
                "Trabajo duro, estructura, bases sólidas, disciplina",
                "Organiza tu vida, trabaja con disciplina, construye cimientos",
            ),
        ),
        (
            5,
            cycle(
                "Año de Cambios",
                "Libertad, aventura, cambios, adaptabilidad",
                "Abraza el cambio, busca nuevas experiencias, sé flexible",
            ),
        ),
        (
            6,
            cycle(
                "Año de Responsabilidad",
                "Familia, hogar, servicio, armonía",
                "Cuida tus relaciones familiares, sé responsable, busca armonía",
            ),
        ),
        (
            7,
            cycle(
                "Año de Introspección",
                "Espiritualidad, análisis, soledad productiva, conocimiento",
                "Medita, estudia, busca conocimiento interior, reflexiona",
            ),
        ),
        (
            8,
            cycle(
                "Año de Poder",
                "Logros materiales, autoridad, éxito profesional",
                "Enfócate en metas materiales, asume liderazgo, busca éxito",
            ),
        ),
        (
            9,
            cycle(
                "Año de Culminación",
                "Cierre de ciclos, humanitarismo, sabiduría, desapego",
                "Cierra ciclos, ayuda a otros, comparte tu sabiduría",
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_nine_cycles_present() {
        let kb = KnowledgeBase::new();
        for year in 1..=9u8 {
            let meaning = kb.cycle(year).unwrap();
            assert!(!meaning.name.is_empty());
            assert!(!meaning.description.is_empty());
            assert!(!meaning.advice.is_empty());
        }
        assert!(kb.cycle(0).is_none());
        assert!(kb.cycle(10).is_none());
    }

    #[test]
    fn test_only_real_archetypes_have_profiles() {
        let kb = KnowledgeBase::new();
        assert!(kb.shape_profile(ShapeLabel::Square).is_some());
        assert!(kb.shape_profile(ShapeLabel::Conic).is_some());
        assert!(kb.shape_profile(ShapeLabel::Philosophic).is_some());
        assert!(kb.shape_profile(ShapeLabel::Spatulate).is_some());
        assert!(kb.shape_profile(ShapeLabel::Indeterminate).is_none());
        assert!(kb.shape_profile(ShapeLabel::Error).is_none());
    }

    #[test]
    fn test_line_mount_and_sign_lookups() {
        let kb = KnowledgeBase::new();
        assert!(kb
            .line_meaning(LineName::Destiny, "ausente")
            .unwrap()
            .contains("camino"));
        assert!(kb.line_meaning(LineName::Life, "inexistente").is_none());
        assert!(kb.mount_meaning("venus").unwrap().contains("Amor"));
        assert!(kb.mount_meaning("pluton").is_none());
        assert!(kb.sign_meaning("estrella").unwrap().contains("Evento"));
    }

    #[test]
    fn test_global_is_shared() {
        let a = KnowledgeBase::global() as *const KnowledgeBase;
        let b = KnowledgeBase::global() as *const KnowledgeBase;
        assert_eq!(a, b);
    }
}
