// Deterministic instruction text for assistant provisioning.
//
// Same inputs must produce byte-identical output; input ordering is
// preserved, never normalized. The fingerprint of the text is what the
// provisioner caches alongside the assistant handle.

use attendant_types::{BusinessDocument, BusinessFact, ClientProfile};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Build the instruction text for one client's assistant.
pub fn build_instructions(
    profile: &ClientProfile,
    facts: &[BusinessFact],
    documents: &[BusinessDocument],
) -> String {
    let mut lines = vec![
        "You are Attendant, a sales and support assistant for businesses.".to_string(),
        format!("You are helping {}.", profile.name),
        format!("Preferred language: {}", profile.lang),
        "\nBusiness information:".to_string(),
    ];

    for fact in facts {
        lines.push(format!("- {}: {}", fact.title, fact.content));
    }

    if !documents.is_empty() {
        lines.push("\nAvailable documents:".to_string());
        for document in documents {
            lines.push(format!("- {}: {}", document.title, document.summary));
        }
    }

    lines.join("\n")
}

/// Hash of the instruction text, stored with the assistant handle at
/// creation time.
pub fn instructions_fingerprint(instructions: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    instructions.hash(&mut hasher);
    hasher.finish()
}
