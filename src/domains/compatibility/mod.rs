//! Blood-group donation compatibility.
//!
//! Fixed medical rule set: which groups a donor may give to and which a
//! recipient may receive from. The two relations are mutually consistent and
//! process-wide constants.

use crate::domains::request::types::BloodRequest;
use crate::types::BloodGroup;

use BloodGroup::*;

/// Groups a donor with the given blood group can donate to
pub fn can_donate_to(group: BloodGroup) -> &'static [BloodGroup] {
    match group {
        APositive => &[APositive, ABPositive],
        ANegative => &[APositive, ANegative, ABPositive, ABNegative],
        BPositive => &[BPositive, ABPositive],
        BNegative => &[BPositive, BNegative, ABPositive, ABNegative],
        ABPositive => &[ABPositive],
        ABNegative => &[ABPositive, ABNegative],
        OPositive => &[OPositive, APositive, BPositive, ABPositive],
        ONegative => &[
            APositive, ANegative, BPositive, BNegative, ABPositive, ABNegative, OPositive,
            ONegative,
        ],
    }
}

/// Groups a recipient with the given blood group can receive from
pub fn can_receive_from(group: BloodGroup) -> &'static [BloodGroup] {
    match group {
        APositive => &[APositive, ANegative, OPositive, ONegative],
        ANegative => &[ANegative, ONegative],
        BPositive => &[BPositive, BNegative, OPositive, ONegative],
        BNegative => &[BNegative, ONegative],
        ABPositive => &[
            APositive, ANegative, BPositive, BNegative, ABPositive, ABNegative, OPositive,
            ONegative,
        ],
        ABNegative => &[ANegative, BNegative, ABNegative, ONegative],
        OPositive => &[OPositive, ONegative],
        ONegative => &[ONegative],
    }
}

/// Check whether a donor group may donate to a recipient group
pub fn is_compatible(donor: BloodGroup, recipient: BloodGroup) -> bool {
    can_donate_to(donor).contains(&recipient)
}

/// Filter `requests` down to those the donor is medically eligible to fulfil.
///
/// Input order is preserved. A donor without a recorded blood group is
/// eligible for nothing; that is an empty result, not an error. Pure and
/// reentrant, O(n) over the requests.
pub fn eligible_requests<'a>(
    donor_group: Option<BloodGroup>,
    requests: &'a [BloodRequest],
) -> Vec<&'a BloodRequest> {
    let Some(donor_group) = donor_group else {
        return Vec::new();
    };
    let targets = can_donate_to(donor_group);
    requests
        .iter()
        .filter(|request| targets.contains(&request.blood_group))
        .collect()
}
