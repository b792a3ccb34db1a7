//! Operation schema templates for the card gateway
//!
//! Each backend operation accepts caller data shaped to a fixed template.
//! Templates are expressed as a tagged schema tree: scalars, nested objects,
//! and repeated groups. Only the key structure is described - scalar values
//! are never type- or content-checked by the validator.

use std::collections::BTreeMap;

/// A node in an operation's shape template
///
/// Schemas are built once at gateway construction and never mutated
/// afterwards; concurrent calls read them without coordination.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A scalar placeholder; the corresponding value is accepted as-is
    Scalar,

    /// A nested mapping whose key set must match exactly
    Object(BTreeMap<String, Shape>),

    /// A sequence of repeated sub-groups, each matching the inner shape
    Group(Box<Shape>),
}

impl Shape {
    /// Build an `Object` shape from `(key, shape)` pairs
    pub fn object<const N: usize>(fields: [(&str, Shape); N]) -> Self {
        Shape::Object(
            fields
                .into_iter()
                .map(|(key, shape)| (key.to_string(), shape))
                .collect(),
        )
    }

    /// Build a `Group` shape from its element template
    pub fn group(element: Shape) -> Self {
        Shape::Group(Box::new(element))
    }
}

/// The immutable shape templates for the five gateway operations
///
/// One template exists per transaction type. The key set of every template
/// is fixed at construction; the validator compares caller data against
/// these trees recursively.
#[derive(Debug, Clone)]
pub struct OperationSchemas {
    /// Template for card issuance (`AddCard`)
    pub add_card: Shape,

    /// Template for card funding (`CreditFunds`)
    pub load_card: Shape,

    /// Template for balance inquiry (`balanceInquiry`)
    pub check_balance: Shape,

    /// Template for the debit-network withdrawal (`CARD_DEBIT`)
    pub debit_funds: Shape,

    /// Template for card activation (`activateCard`)
    pub activate_card: Shape,
}

impl OperationSchemas {
    /// Build the five operation templates
    pub fn new() -> Self {
        OperationSchemas {
            add_card: Shape::object([
                ("CardAcceptor", Shape::object([("Id", Shape::Scalar)])),
                ("Card", Shape::object([("StartingNumbers", Shape::Scalar)])),
                (
                    "Profile",
                    Shape::object([
                        (
                            "Holders",
                            Shape::group(Shape::object([
                                ("FirstName", Shape::Scalar),
                                ("LastName", Shape::Scalar),
                                ("Email", Shape::Scalar),
                                ("CellNumber", Shape::Scalar),
                            ])),
                        ),
                        ("ApplyFee", Shape::Scalar),
                    ]),
                ),
            ]),
            load_card: Shape::object([
                ("CardAcceptor", Shape::object([("Id", Shape::Scalar)])),
                ("Card", Shape::object([("ReferenceID", Shape::Scalar)])),
                ("FundingCard", Shape::object([("Number", Shape::Scalar)])),
                ("ApplyFee", Shape::Scalar),
                ("Amount", Shape::Scalar),
            ]),
            check_balance: Shape::object([
                ("CardAcceptor", Shape::object([("Id", Shape::Scalar)])),
                ("Card", Shape::object([("ReferenceID", Shape::Scalar)])),
                ("ApplyFee", Shape::Scalar),
            ]),
            debit_funds: Shape::object([
                (
                    "Card",
                    Shape::object([
                        ("Number", Shape::Scalar),
                        ("ExpiryDate", Shape::Scalar),
                    ]),
                ),
                ("TransactionRefId", Shape::Scalar),
                ("Amount", Shape::Scalar),
            ]),
            activate_card: Shape::object([
                (
                    "CardAcceptor",
                    Shape::object([("LocalDateTime", Shape::Scalar)]),
                ),
                ("Card", Shape::object([("ReferenceID", Shape::Scalar)])),
            ]),
        }
    }
}

impl Default for OperationSchemas {
    fn default() -> Self {
        Self::new()
    }
}
