//! Import helpers for simplifying resource import implementations

use crate::context::Context;
use crate::resource::{ImportResourceStateRequest, ImportResourceStateResponse, ImportedResource};
use crate::types::{AttributePath, Diagnostic, DynamicValue};

/// Parse an import identifier that must be a decimal integer
pub fn parse_int_id(id: &str) -> Result<i64, Diagnostic> {
    id.trim().parse::<i64>().map_err(|_| {
        Diagnostic::error(
            "Unexpected Import Identifier",
            format!("Expected import identifier with format: ID. Got: {:?}", id),
        )
    })
}

/// Sets the integer import ID on a single attribute in state
///
/// Terraform follows up with a read, which fills in everything else.
///
/// Example: ID "12" -> state.id = 12
pub fn import_state_passthrough_int_id(
    _ctx: &Context,
    attr_path: AttributePath,
    request: &ImportResourceStateRequest,
    response: &mut ImportResourceStateResponse,
) {
    let id = match parse_int_id(&request.id) {
        Ok(id) => id,
        Err(diagnostic) => {
            response.diagnostics.push(diagnostic);
            return;
        }
    };

    let mut state = DynamicValue::object();
    if let Err(e) = state.set_i64(&attr_path, id) {
        response.diagnostics.push(
            Diagnostic::error(
                format!("Failed to set import ID: {}", e),
                format!("Could not set attribute '{}' to value '{}'", attr_path, id),
            )
            .with_attribute(attr_path),
        );
        return;
    }

    tracing::trace!("imported {}: {}", request.type_name, id);
    response.imported_resources.push(ImportedResource {
        type_name: request.type_name.clone(),
        state,
    });
}
