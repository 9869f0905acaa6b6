use cosmos_common::{CosmosError, Result};

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Planck constant (J·s).
pub const PLANCK: f64 = 6.626_070_15e-34;
/// Newtonian gravitational constant (m³/kg·s²).
pub const GRAVITATIONAL: f64 = 6.674_30e-11;
/// Vacuum permittivity (F/m).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;

/// The fixed head of every constant table, in order.
pub const REFERENCE_CONSTANTS: [f64; 4] = [SPEED_OF_LIGHT, PLANCK, GRAVITATIONAL, VACUUM_PERMITTIVITY];

/// Build the ordered constant table for a world.
///
/// Indices 0..4 hold [`REFERENCE_CONSTANTS`] (as many as fit); every later index
/// `i` holds `1 / (i + 1)`. A count of zero is rejected before anything is
/// allocated.
pub fn constant_table(count: usize) -> Result<Vec<f64>> {
    if count == 0 {
        return Err(CosmosError::invalid("constant count must be positive"));
    }

    let mut table = Vec::new();
    table
        .try_reserve_exact(count)
        .map_err(|e| CosmosError::allocation("constant table", e))?;

    table.extend(REFERENCE_CONSTANTS.iter().take(count));
    table.extend((REFERENCE_CONSTANTS.len()..count).map(|i| 1.0 / (i as f64 + 1.0)));
    Ok(table)
}
