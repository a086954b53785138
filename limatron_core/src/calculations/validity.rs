//! Validity filter: marks dedicated loads whose connection type needs more
//! phases than the supply provides.

use tracing::warn;

use crate::calculations::circuits::DerivedCircuit;
use crate::system::{ConnectionType, SystemClass};

/// A load wired as `connection` can be served by `system`.
pub fn is_valid(connection: ConnectionType, system: SystemClass) -> bool {
    system.accepts(connection)
}

/// Mark each circuit valid or invalid for `system` and return one warning per
/// invalid load.
pub fn apply_validity(circuits: &mut [DerivedCircuit], system: SystemClass) -> Vec<String> {
    let mut warnings = Vec::new();
    for circuit in circuits.iter_mut() {
        circuit.valid = is_valid(circuit.connection, system);
        if !circuit.valid {
            let message = format!(
                "{} {} is wired {} and cannot be served by a {} supply; excluded from demand and balancing",
                circuit.label,
                circuit.index + 1,
                circuit.connection.display_name().to_lowercase(),
                system.display_name().to_lowercase(),
            );
            warn!(circuit = %circuit.id(), "{}", message);
            warnings.push(message);
        }
    }
    warnings
}
