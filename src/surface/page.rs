//! Static page chrome.
//!
//! Text shown around the upload control and the two display panels. The
//! rendering layer itself (widgets, columns, reload behavior) lives outside
//! this crate; renderers pull these constants and lay them out however they
//! like.

/// Page title.
pub const PAGE_TITLE: &str = "Human Attribute Detection";

/// Introductory blurb shown under the title.
pub const PAGE_INTRO: &str = "This tool uses Google's Gemini model to analyze and detect \
various human attributes from uploaded images. Simply upload an image, and the model will \
return detailed insights such as gender, age, mood, and more.";

/// Label for the file-upload control.
pub const UPLOAD_LABEL: &str = "Upload an Image";

/// Caption under the uploaded-image panel.
pub const IMAGE_CAPTION: &str = "Uploaded Image";

/// Step-by-step sidebar instructions.
pub const SIDEBAR_INSTRUCTIONS: [&str; 3] = [
    "Upload a clear image of a person.",
    "Wait for the analysis to complete.",
    "The AI will provide insights into various human attributes.",
];

/// Footer line.
pub const FOOTER: &str = "Powered by Google Gemini";
