//! Trigger vocabulary: canonical markers and precomputed fuzzy variants.
//!
//! The vocabulary is immutable once constructed. Callers either take the
//! builtin tables or inject their own definitions, which keeps matching
//! deterministic and unit-testable without process-wide state.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use inkline_core::{Error, FuzzyVariant, NoteTypeTag, Result, TriggerDefinition};

/// Builtin canonical markers. Synonyms are allowed: several markers may map
/// to the same tag. Order matters only as the final tie-break when two
/// markers match at the same offset with the same length.
static BUILTIN_DEFINITIONS: Lazy<Vec<TriggerDefinition>> = Lazy::new(|| {
    vec![
        TriggerDefinition::new("#todo#", NoteTypeTag::Todo),
        TriggerDefinition::new("#task#", NoteTypeTag::Todo),
        TriggerDefinition::new("#email#", NoteTypeTag::Email),
        TriggerDefinition::new("#mail#", NoteTypeTag::Email),
        TriggerDefinition::new("#meeting#", NoteTypeTag::Meeting),
        TriggerDefinition::new("#meet#", NoteTypeTag::Meeting),
        TriggerDefinition::new("#reminder#", NoteTypeTag::Reminder),
        TriggerDefinition::new("#remind#", NoteTypeTag::Reminder),
        TriggerDefinition::new("#contact#", NoteTypeTag::Contact),
        TriggerDefinition::new("#expense#", NoteTypeTag::Expense),
        TriggerDefinition::new("#receipt#", NoteTypeTag::Expense),
        TriggerDefinition::new("#shopping#", NoteTypeTag::Shopping),
        TriggerDefinition::new("#groceries#", NoteTypeTag::Shopping),
        TriggerDefinition::new("#buy#", NoteTypeTag::Shopping),
        TriggerDefinition::new("#recipe#", NoteTypeTag::Recipe),
        TriggerDefinition::new("#event#", NoteTypeTag::Event),
        TriggerDefinition::new("#idea#", NoteTypeTag::Idea),
        TriggerDefinition::new("#ai#", NoteTypeTag::ExternalPrompt),
        TriggerDefinition::new("#ask#", NoteTypeTag::ExternalPrompt),
        TriggerDefinition::new("#note#", NoteTypeTag::General),
    ]
});

/// Builtin OCR corruption catalogue. Each entry is a misreading observed in
/// recognized handwriting output: digit/letter confusion (0/o, 1/l, 5/s),
/// letter splits (m → rn) and merges (cl → d).
static BUILTIN_VARIANTS: Lazy<Vec<FuzzyVariant>> = Lazy::new(|| {
    vec![
        FuzzyVariant::new("#tod0#", "#todo#"),
        FuzzyVariant::new("#t0do#", "#todo#"),
        FuzzyVariant::new("#toclo#", "#todo#"),
        FuzzyVariant::new("#ta5k#", "#task#"),
        FuzzyVariant::new("#emai1#", "#email#"),
        FuzzyVariant::new("#ema1l#", "#email#"),
        FuzzyVariant::new("#emall#", "#email#"),
        FuzzyVariant::new("#rneeting#", "#meeting#"),
        FuzzyVariant::new("#meefing#", "#meeting#"),
        FuzzyVariant::new("#rerninder#", "#reminder#"),
        FuzzyVariant::new("#remincler#", "#reminder#"),
        FuzzyVariant::new("#c0ntact#", "#contact#"),
        FuzzyVariant::new("#contacf#", "#contact#"),
        FuzzyVariant::new("#expen5e#", "#expense#"),
        FuzzyVariant::new("#sh0pping#", "#shopping#"),
        FuzzyVariant::new("#reclpe#", "#recipe#"),
        FuzzyVariant::new("#evenf#", "#event#"),
        FuzzyVariant::new("#ldea#", "#idea#"),
        FuzzyVariant::new("#idca#", "#idea#"),
        FuzzyVariant::new("#n0te#", "#note#"),
    ]
});

/// Immutable marker vocabulary shared by the matchers and the splitter.
#[derive(Debug, Clone)]
pub struct TriggerVocabulary {
    definitions: Vec<TriggerDefinition>,
    /// variant spelling → index into `definitions` of its canonical marker.
    variant_index: HashMap<String, usize>,
    /// canonical marker → index into `definitions`.
    marker_index: HashMap<String, usize>,
}

impl TriggerVocabulary {
    /// Build a vocabulary from injected tables.
    ///
    /// Validation: at least one definition, no duplicate markers, and every
    /// variant must resolve to a defined canonical marker.
    pub fn new(
        definitions: Vec<TriggerDefinition>,
        variants: Vec<FuzzyVariant>,
    ) -> Result<Self> {
        if definitions.is_empty() {
            return Err(Error::InvalidInput(
                "trigger vocabulary requires at least one definition".to_string(),
            ));
        }

        let mut marker_index = HashMap::new();
        for (i, def) in definitions.iter().enumerate() {
            if marker_index.insert(def.marker.clone(), i).is_some() {
                return Err(Error::InvalidInput(format!(
                    "duplicate marker in vocabulary: {}",
                    def.marker
                )));
            }
        }

        let mut variant_index = HashMap::new();
        for variant in &variants {
            let Some(&idx) = marker_index.get(&variant.canonical) else {
                return Err(Error::InvalidInput(format!(
                    "fuzzy variant '{}' references unknown marker '{}'",
                    variant.variant, variant.canonical
                )));
            };
            variant_index.insert(variant.variant.clone(), idx);
        }

        debug!(
            definition_count = definitions.len(),
            variant_count = variant_index.len(),
            "Trigger vocabulary constructed"
        );

        Ok(Self {
            definitions,
            variant_index,
            marker_index,
        })
    }

    /// The builtin marker and variant tables.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_DEFINITIONS.clone(), BUILTIN_VARIANTS.clone())
            .expect("builtin vocabulary tables are valid")
    }

    /// All canonical definitions, in tie-break order.
    pub fn definitions(&self) -> &[TriggerDefinition] {
        &self.definitions
    }

    /// Look up a canonical marker (lowercase).
    pub fn definition_for(&self, marker: &str) -> Option<&TriggerDefinition> {
        self.marker_index.get(marker).map(|&i| &self.definitions[i])
    }

    /// Resolve a catalogued OCR corruption (lowercase) to its canonical
    /// definition.
    pub fn resolve_variant(&self, token: &str) -> Option<&TriggerDefinition> {
        self.variant_index.get(token).map(|&i| &self.definitions[i])
    }

    /// All canonical markers bound to the given tag.
    pub fn markers_for(&self, tag: NoteTypeTag) -> Vec<&str> {
        self.definitions
            .iter()
            .filter(|d| d.tag == tag)
            .map(|d| d.marker.as_str())
            .collect()
    }
}
