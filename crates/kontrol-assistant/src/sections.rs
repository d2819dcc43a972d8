//! Per-section widget copy: header title, greeting and suggested questions.

use kontrol_common::Section;

/// Static copy shown by the widget for one application section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionContext {
    pub section: Section,
    pub title: &'static str,
    pub greeting: &'static str,
    pub suggestions: &'static [&'static str],
}

const DASHBOARD: SectionContext = SectionContext {
    section: Section::Dashboard,
    title: "Asistente del Dashboard",
    greeting: "Puedo ayudarte a analizar tus transacciones, detectar patrones y optimizar tu categorización fiscal.",
    suggestions: &[
        "¿Qué transacciones debería revisar?",
        "Detecta duplicados o errores",
        "Optimiza categorización fiscal",
    ],
};

const FISCAL: SectionContext = SectionContext {
    section: Section::Fiscal,
    title: "Asistente Fiscal",
    greeting: "Te ayudo a simular escenarios, optimizar tu fiscalidad y planificar tus operaciones.",
    suggestions: &[
        "Simula venta de 0.5 BTC",
        "¿Cómo reducir mi deuda fiscal?",
        "Mejor momento para vender",
    ],
};

const WALLETS: SectionContext = SectionContext {
    section: Section::Wallets,
    title: "Asistente de Wallets",
    greeting: "Puedo analizar tu red de wallets, sugerir optimizaciones y ayudarte con etiquetas.",
    suggestions: &[
        "Analiza mi red de wallets",
        "Consolida wallets duplicadas",
        "Recomienda organización",
    ],
};

const EXCHANGES: SectionContext = SectionContext {
    section: Section::Exchanges,
    title: "Asistente de Exchanges",
    greeting: "Te ayudo a optimizar tus operaciones en exchanges y analizar oportunidades.",
    suggestions: &[
        "Compara fees entre exchanges",
        "Mejores horarios para trading",
        "Detecta oportunidades de arbitraje",
    ],
};

/// Copy for `section`.
pub fn context_for(section: Section) -> &'static SectionContext {
    match section {
        Section::Dashboard => &DASHBOARD,
        Section::Fiscal => &FISCAL,
        Section::Wallets => &WALLETS,
        Section::Exchanges => &EXCHANGES,
    }
}
