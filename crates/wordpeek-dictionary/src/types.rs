use serde::Deserialize;

/// One element of the provider's top-level JSON array.
///
/// Every field is optional; the provider omits or nulls them freely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entry {
    pub word: Option<String>,
    #[serde(default)]
    pub phonetics: Option<Vec<Phonetic>>,
    #[serde(default)]
    pub meanings: Option<Vec<Meaning>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Phonetic {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meaning {
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub definitions: Option<Vec<Definition>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Definition {
    pub definition: Option<String>,
    pub example: Option<String>,
}
