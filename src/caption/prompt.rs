use std::fmt::Write as _;

use crate::assets::TemplateCatalog;

/// Build the instruction a completion model receives for one generate or refine call.
///
/// The model is asked for a JSON object with `templateId`, `topText` and `bottomText`; see
/// [`crate::caption::CaptionPlan::from_model_response`] for how the answer is read back.
pub fn build_prompt(source_text: &str, refinement: Option<&str>, catalog: &TemplateCatalog) -> String {
    let mut out = String::new();
    out.push_str(
        "Analyze the following corporate text. Your goal is to create a funny, safe-for-work meme \
         that boosts morale by finding humor in corporate life.\n\n",
    );
    out.push_str("First, choose the most appropriate meme template from the list below.\n");
    out.push_str(
        "Second, write the text for the meme. Most memes have a top text and a bottom text. \
         If a text area is not needed for the meme format (e.g., Success Kid usually only has \
         one line), return an empty string for the unused text area.\n\n",
    );

    out.push_str("Available Templates:\n---\n");
    for t in catalog.iter() {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "- id: \"{}\", name: \"{}\"", t.id, t.name);
    }
    out.push_str("---\n\n");

    out.push_str("Corporate Text:\n---\n");
    out.push_str(source_text.trim());
    out.push_str("\n---\n\n");

    if let Some(instruction) = refinement.map(str::trim).filter(|s| !s.is_empty()) {
        out.push_str("Refinement Instruction:\n---\n");
        out.push_str(instruction);
        out.push_str(
            "\n---\nBased on the instruction, please regenerate the meme text or choose a \
             better template.\n\n",
        );
    }

    let example = catalog.iter().next().map(|t| t.id.as_str()).unwrap_or("template-id");
    let _ = write!(
        out,
        "Return a JSON object with three properties:\n\
         1. \"templateId\": The id of the chosen meme template (e.g., \"{example}\").\n\
         2. \"topText\": The text that should appear at the top of the meme.\n\
         3. \"bottomText\": The text that should appear at the bottom of the meme.\n"
    );
    out
}

#[cfg(test)]
#[path = "../../tests/unit/caption/prompt.rs"]
mod tests;
