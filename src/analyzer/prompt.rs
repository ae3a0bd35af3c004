//! The fixed instruction template sent with every image.
//!
//! Treated as versioned configuration data: it never varies with the input
//! and can be inspected and tested without touching the network. The
//! no-apology instruction is advisory prompt text only; the service may
//! still refuse, and a refusal delivered as ordinary text counts as a
//! successful response.

/// Instruction sent verbatim alongside every uploaded image.
pub const ATTRIBUTE_PROMPT: &str = "\
You are an AI trained to analyze human attributes from images with high accuracy.
Carefully analyze the given image and return the following structured details:

You have to return all results as you have the image, don't want any apologize or empty results.

- **Gender** (Male/Female/Non-binary)
- **Age Estimate** (e.g., 25 years)
- **Ethnicity** (e.g., Asian, Caucasian, African, etc.)
- **Mood** (e.g., Happy, Sad, Neutral, Excited)
- **Facial Expression** (e.g., Smiling, Frowning, Neutral, etc.)
- **Glasses** (Yes/No)
- **Beard** (Yes/No)
- **Hair Color** (e.g., Black, Blonde, Brown)
- **Eye Color** (e.g., Blue, Green, Brown)
- **Headwear** (Yes/No, specify type if applicable)
- **Emotions Detected** (e.g., Joyful, Focused, Angry, etc.)
- **Confidence Level** (Accuracy of prediction in percentage)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_every_attribute() {
        for attribute in [
            "Gender",
            "Age Estimate",
            "Ethnicity",
            "Mood",
            "Facial Expression",
            "Glasses",
            "Beard",
            "Hair Color",
            "Eye Color",
            "Headwear",
            "Emotions Detected",
            "Confidence Level",
        ] {
            assert!(
                ATTRIBUTE_PROMPT.contains(attribute),
                "prompt is missing {attribute}"
            );
        }
    }

    #[test]
    fn test_prompt_forbids_empty_answers() {
        assert!(ATTRIBUTE_PROMPT.contains("don't want any apologize or empty results"));
    }
}
