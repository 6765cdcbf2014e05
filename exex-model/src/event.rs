use crate::{
    coin_term::CoinTermId,
    collection::CollectedItem,
    expression::ExpressionId,
    hint::ExpressionHint,
};

/// Something that happened inside the model, reported to whoever presents it.
///
/// Events accumulate until they are taken with
/// [`ExpressionManipulationModel::drain_events`](crate::ExpressionManipulationModel::drain_events).
#[derive(Clone, Debug, PartialEq)]
pub enum ModelEvent {
    CoinTermAdded(CoinTermId),
    CoinTermRemoved(CoinTermId),
    ExpressionAdded(ExpressionId),
    ExpressionRemoved(ExpressionId),

    /// The size of the expression or the slots of its members changed.
    ExpressionLayoutChanged(ExpressionId),

    HintAdded(ExpressionHint),
    HintRemoved(ExpressionHint),

    /// The `absorbed` coin term was merged into the `survivor`, and no longer exists.
    CoinTermsCombined {
        survivor: CoinTermId,
        absorbed: CoinTermId,
    },

    /// The `original` coin term was split, and the `extracted` coin terms were created from it.
    CoinTermBrokenApart {
        original: CoinTermId,
        extracted: Vec<CoinTermId>,
    },

    /// A coin term that started on a creator card made it back to its origin, and no longer
    /// exists.
    ReturnedToOrigin(CoinTermId),

    Collected {
        area: usize,
        item: CollectedItem,
    },
    Rejected {
        area: usize,
        item: CollectedItem,
    },
    Ejected {
        area: usize,
        item: CollectedItem,
    },

    /// The expression in edit mode changed.
    EditModeChanged(Option<ExpressionId>),
}
