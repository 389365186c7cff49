//! The story request form: field options and request encoding.

use crate::api::GenerateRequest;

/// Target age group for the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgeGroup {
    Toddlers,
    #[default]
    YoungChildren,
    OlderChildren,
    Teenagers,
    Adults,
}

impl AgeGroup {
    pub const ALL: [Self; 5] = [
        Self::Toddlers,
        Self::YoungChildren,
        Self::OlderChildren,
        Self::Teenagers,
        Self::Adults,
    ];

    /// String sent to the backend, identical to the label.
    pub fn value(self) -> &'static str {
        match self {
            Self::Toddlers => "Toddlers (3-4 years)",
            Self::YoungChildren => "Young Children (5-8 years)",
            Self::OlderChildren => "Older Children (9-12 years)",
            Self::Teenagers => "Teenagers (13+)",
            Self::Adults => "Adults",
        }
    }

    pub fn label(self) -> &'static str {
        self.value()
    }
}

/// Approximate reading length of the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl StoryLength {
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    pub fn value(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "Short (1-2 min read)",
            Self::Medium => "Medium (3-5 min read)",
            Self::Long => "Long (6-10 min read)",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.value() == value)
    }
}

/// Story language.
///
/// Kazakh submits "English"; the backend has no Kazakh generation yet and
/// this mirrors what the service currently accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Kazakh,
    Russian,
    Japanese,
    German,
}

impl Language {
    pub const ALL: [Self; 5] = [
        Self::English,
        Self::Kazakh,
        Self::Russian,
        Self::Japanese,
        Self::German,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Self::English | Self::Kazakh => "English",
            Self::Russian => "Russian",
            Self::Japanese => "Japanese",
            Self::German => "German",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Kazakh => "Kazakh",
            Self::Russian => "Russian",
            Self::Japanese => "Japanese",
            Self::German => "German",
        }
    }

    /// Matches a configured default against the labels, e.g. `language =
    /// "Kazakh"` in config.toml.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.label() == label)
    }
}

/// Cultural tradition the story should draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CulturalFit {
    #[default]
    Western,
    Eastern,
    African,
    LatinAmerican,
    MiddleEastern,
    Nordic,
    Universal,
}

impl CulturalFit {
    pub const ALL: [Self; 7] = [
        Self::Western,
        Self::Eastern,
        Self::African,
        Self::LatinAmerican,
        Self::MiddleEastern,
        Self::Nordic,
        Self::Universal,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Self::Western => "western",
            Self::Eastern => "eastern",
            Self::African => "african",
            Self::LatinAmerican => "latinamerican",
            Self::MiddleEastern => "middleeastern",
            Self::Nordic => "nordic",
            Self::Universal => "universal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Western => "Western",
            Self::Eastern => "Eastern",
            Self::African => "African",
            Self::LatinAmerican => "Latin American",
            Self::MiddleEastern => "Middle Eastern",
            Self::Nordic => "Nordic",
            Self::Universal => "Universal",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.value() == value)
    }
}

/// Scientific topic to weave into the story, shown only when the
/// scientific-enhancement toggle is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScientificTopic {
    /// "Select a topic..." placeholder, submits an empty string.
    #[default]
    Unselected,
    Astronomy,
    Biology,
    Chemistry,
    Physics,
    Weather,
    HumanBody,
    Geology,
    /// Free-text topic entered by the user.
    Custom,
}

impl ScientificTopic {
    pub const ALL: [Self; 9] = [
        Self::Unselected,
        Self::Astronomy,
        Self::Biology,
        Self::Chemistry,
        Self::Physics,
        Self::Weather,
        Self::HumanBody,
        Self::Geology,
        Self::Custom,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Self::Unselected => "",
            Self::Astronomy => "astronomy",
            Self::Biology => "biology",
            Self::Chemistry => "chemistry",
            Self::Physics => "physics",
            Self::Weather => "weather",
            Self::HumanBody => "human_body",
            Self::Geology => "geology",
            Self::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unselected => "Select a topic...",
            Self::Astronomy => "Astronomy (Stars, Planets, Space)",
            Self::Biology => "Biology (Plants, Animals, Ecosystems)",
            Self::Chemistry => "Chemistry (Matter, Reactions)",
            Self::Physics => "Physics (Forces, Energy)",
            Self::Weather => "Weather & Climate",
            Self::HumanBody => "Human Body",
            Self::Geology => "Geology (Rocks, Minerals, Earth)",
            Self::Custom => "Custom Scientific Topic",
        }
    }
}

/// The in-progress story request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaleDraft {
    pub age: AgeGroup,
    pub topic: String,
    pub moral: String,
    pub length: StoryLength,
    pub language: Language,
    pub cultural_fit: CulturalFit,
    pub scientific_note: bool,
    pub scientific_topic: ScientificTopic,
    pub custom_scientific_note: String,
    pub with_audio: bool,
}

impl TaleDraft {
    /// Whether the custom-topic text field applies to the current state.
    pub fn wants_custom_topic(&self) -> bool {
        self.scientific_note && self.scientific_topic == ScientificTopic::Custom
    }

    /// Encodes the draft as a generation request.
    ///
    /// `culture` is null for "universal". `scientific_note` carries the
    /// selected topic value when the toggle is on; with the custom topic it
    /// carries the trimmed free text, or null when that text is blank. With
    /// the toggle off it is always null, whatever the topic fields hold.
    pub fn to_request(&self) -> GenerateRequest {
        let culture = match self.cultural_fit {
            CulturalFit::Universal => None,
            other => Some(other.value().to_string()),
        };

        let scientific_note = if self.scientific_note {
            match self.scientific_topic {
                ScientificTopic::Custom => {
                    let custom = self.custom_scientific_note.trim();
                    if custom.is_empty() {
                        None
                    } else {
                        Some(custom.to_string())
                    }
                }
                topic => Some(topic.value().to_string()),
            }
        } else {
            None
        };

        GenerateRequest {
            age: self.age.value().to_string(),
            topic: self.topic.clone(),
            moral: self.moral.clone(),
            length: self.length.value().to_string(),
            language: self.language.value().to_string(),
            culture,
            scientific_note,
            with_audio: self.with_audio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_form() {
        let draft = TaleDraft::default();
        assert_eq!(draft.age, AgeGroup::YoungChildren);
        assert_eq!(draft.length, StoryLength::Medium);
        assert_eq!(draft.language, Language::English);
        assert_eq!(draft.cultural_fit, CulturalFit::Western);
        assert!(!draft.scientific_note);
        assert!(!draft.with_audio);
    }

    #[test]
    fn universal_culture_encodes_as_null() {
        let draft = TaleDraft {
            cultural_fit: CulturalFit::Universal,
            ..TaleDraft::default()
        };
        assert_eq!(draft.to_request().culture, None);

        let draft = TaleDraft {
            cultural_fit: CulturalFit::Nordic,
            ..TaleDraft::default()
        };
        assert_eq!(draft.to_request().culture.as_deref(), Some("nordic"));
    }

    #[test]
    fn scientific_note_off_suppresses_topic() {
        let draft = TaleDraft {
            scientific_note: false,
            scientific_topic: ScientificTopic::Astronomy,
            custom_scientific_note: "volcanoes".to_string(),
            ..TaleDraft::default()
        };
        assert_eq!(draft.to_request().scientific_note, None);
    }

    #[test]
    fn scientific_note_on_sends_topic_value() {
        let draft = TaleDraft {
            scientific_note: true,
            scientific_topic: ScientificTopic::HumanBody,
            ..TaleDraft::default()
        };
        assert_eq!(
            draft.to_request().scientific_note.as_deref(),
            Some("human_body")
        );
    }

    #[test]
    fn custom_topic_sends_trimmed_text_or_null() {
        let mut draft = TaleDraft {
            scientific_note: true,
            scientific_topic: ScientificTopic::Custom,
            custom_scientific_note: "  how rainbows form  ".to_string(),
            ..TaleDraft::default()
        };
        assert_eq!(
            draft.to_request().scientific_note.as_deref(),
            Some("how rainbows form")
        );

        draft.custom_scientific_note = "   ".to_string();
        assert_eq!(draft.to_request().scientific_note, None);
    }

    #[test]
    fn kazakh_submits_english() {
        let draft = TaleDraft {
            language: Language::Kazakh,
            ..TaleDraft::default()
        };
        assert_eq!(draft.to_request().language, "English");
        assert_eq!(Language::Kazakh.label(), "Kazakh");
    }

    #[test]
    fn language_from_label_matches_display_names() {
        assert_eq!(Language::from_label("Kazakh"), Some(Language::Kazakh));
        assert_eq!(Language::from_label("German"), Some(Language::German));
        assert_eq!(Language::from_label("Klingon"), None);
    }
}
