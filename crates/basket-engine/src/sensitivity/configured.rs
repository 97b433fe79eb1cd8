//! Registration of deltas from a risk configuration.

use basket_config::{Bucketing, MethodKind, RiskConfig, Validate};
use basket_core::SymbolKind;
use basket_curves::Selector;
use tracing::info;

use super::delta::{DeltaRule, DeltaScope};
use crate::error::EngineResult;
use crate::market::MarketDataStore;

/// Registers the configured rule on every sheet and basket of the store.
///
/// Each symbol takes the settings of its kind's category. Baskets are always
/// bumped in parallel across constituents, and single names fall back from
/// `DerivativeBasket` to `Derivative`. Returns the number of deltas.
pub fn register_configured_bumps(store: &MarketDataStore, config: &RiskConfig) -> EngineResult<usize> {
    config.validate_or_error()?;

    let mut count = 0;
    for symbol in store.symbols().into_iter().chain(store.basket_symbols()) {
        let settings = config.settings_for(symbol.kind().category());
        let mut rule = DeltaRule::from_settings(settings);

        if symbol.kind() == SymbolKind::Basket {
            if settings.bucketing == Bucketing::PerPillar {
                rule = rule.with_scope(DeltaScope::Selector(Selector::All));
            }
        } else if rule.method == MethodKind::DerivativeBasket {
            rule = rule.with_method(MethodKind::Derivative);
        }

        count += store.register_bump(&symbol, &rule)?.len();
    }

    info!(config = %config.name, deltas = count, "registered configured bumps");
    Ok(count)
}
