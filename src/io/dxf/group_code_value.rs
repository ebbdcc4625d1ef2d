//! Group code classification
//!
//! The meaning of a DXF value line depends only on the numeric group code in
//! front of it. [`GroupCodeValueType::from_code`] maps every code to the kind
//! of value the token reader must decode.

/// Section / record start (`0 SECTION`, `0 LINE`, ...)
pub const START: i32 = 0;
/// Entity / table record name
pub const NAME: i32 = 2;
/// Header variable name (`9 $ACADVER`)
pub const VARIABLE_NAME: i32 = 9;
/// Paper space flag of an entity
pub const PAPER_SPACE: i32 = 67;
/// Subclass marker (`100 AcDbEntity`)
pub const SUBCLASS: i32 = 100;
/// Application group control string (`102 {ACAD_REACTORS`)
pub const CONTROL_STRING: i32 = 102;
/// Comment, skipped by the reader
pub const COMMENT: i32 = 999;
/// Extended data application name
pub const APP_NAME: i32 = 1001;
/// Extended data control string (`{` / `}`)
pub const XDATA_CONTROL_STRING: i32 = 1002;

/// Value kind of a group code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupCodeValueType {
    /// Undocumented code; the value is kept as raw text
    None,
    String,
    /// First code of a `code`, `code + 10`, `code + 20` coordinate triple
    Point3D,
    Double,
    /// 8-bit integer (also booleans 290-299)
    Byte,
    Int16,
    Int32,
    Int64,
    /// Hex-encoded binary chunk, possibly split across several lines
    Chunk,
    /// Plain object handle
    Handle,
    HardOwner,
    SoftOwner,
    HardPointer,
    SoftPointer,
}

/// Flavor of a handle-valued group code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceType {
    Handle,
    HardOwner,
    SoftOwner,
    HardPointer,
    SoftPointer,
}

impl GroupCodeValueType {
    /// Classify a group code. Total over `i32`: undocumented codes map to
    /// [`GroupCodeValueType::None`].
    pub fn from_code(code: i32) -> Self {
        use GroupCodeValueType::*;
        match code {
            38..=59 | 140..=149 | 460..=469 | 1040..=1042 => Double,
            90..=99 | 420..=429 | 440..=459 | 1071 => Int32,
            60..=79 | 170..=179 | 270..=279 | 370..=389 | 400..=409 | 1070 => Int16,
            280..=299 | 1002 => Byte,
            160..=169 => Int64,
            -4 | 0..=4 | 6..=9 | 100..=102 | 300..=309 | 410..=419 | 430..=439 | 470..=479
            | 999 | 1000 | 1001 | 1003 => String,
            310..=319 | 1004 => Chunk,
            5 | 105 | 320..=329 | 1005 => Handle,
            360..=369 => HardOwner,
            350..=359 => SoftOwner,
            -2 | 340..=349 | 390..=399 => HardPointer,
            -1 | 330..=339 => SoftPointer,
            10..=17 | 110..=112 | 210..=219 | 1010..=1013 | 1020..=1023 | 1030..=1033 => Point3D,
            _ => None,
        }
    }

    /// The reference flavor of a handle-valued kind.
    pub fn reference_type(&self) -> Option<ReferenceType> {
        match self {
            GroupCodeValueType::Handle => Some(ReferenceType::Handle),
            GroupCodeValueType::HardOwner => Some(ReferenceType::HardOwner),
            GroupCodeValueType::SoftOwner => Some(ReferenceType::SoftOwner),
            GroupCodeValueType::HardPointer => Some(ReferenceType::HardPointer),
            GroupCodeValueType::SoftPointer => Some(ReferenceType::SoftPointer),
            _ => None,
        }
    }

    /// Whether the value is parsed as a base-10 integer.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            GroupCodeValueType::Byte
                | GroupCodeValueType::Int16
                | GroupCodeValueType::Int32
                | GroupCodeValueType::Int64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_well_known_codes() {
        assert_eq!(GroupCodeValueType::from_code(START), GroupCodeValueType::String);
        assert_eq!(GroupCodeValueType::from_code(5), GroupCodeValueType::Handle);
        assert_eq!(GroupCodeValueType::from_code(10), GroupCodeValueType::Point3D);
        assert_eq!(GroupCodeValueType::from_code(40), GroupCodeValueType::Double);
        assert_eq!(GroupCodeValueType::from_code(62), GroupCodeValueType::Int16);
        assert_eq!(GroupCodeValueType::from_code(CONTROL_STRING), GroupCodeValueType::String);
        assert_eq!(GroupCodeValueType::from_code(290), GroupCodeValueType::Byte);
        assert_eq!(GroupCodeValueType::from_code(330), GroupCodeValueType::SoftPointer);
        assert_eq!(GroupCodeValueType::from_code(360), GroupCodeValueType::HardOwner);
        assert_eq!(GroupCodeValueType::from_code(420), GroupCodeValueType::Int32);
        assert_eq!(GroupCodeValueType::from_code(XDATA_CONTROL_STRING), GroupCodeValueType::Byte);
        assert_eq!(GroupCodeValueType::from_code(-1), GroupCodeValueType::SoftPointer);
        assert_eq!(GroupCodeValueType::from_code(-2), GroupCodeValueType::HardPointer);
    }

    #[test]
    fn test_reference_flavors() {
        assert_eq!(
            GroupCodeValueType::from_code(350).reference_type(),
            Some(ReferenceType::SoftOwner)
        );
        assert_eq!(
            GroupCodeValueType::from_code(390).reference_type(),
            Some(ReferenceType::HardPointer)
        );
        assert_eq!(GroupCodeValueType::from_code(40).reference_type(), None);
    }

    fn in_ranges(code: i32, ranges: &[(i32, i32)]) -> bool {
        ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&code))
    }

    proptest! {
        #[test]
        fn reals_classify_as_double(code in prop_oneof![38..=59i32, 140..=149i32, 460..=469i32, 1040..=1042i32]) {
            prop_assert_eq!(GroupCodeValueType::from_code(code), GroupCodeValueType::Double);
        }

        #[test]
        fn int32_ranges(code in prop_oneof![90..=99i32, 420..=429i32, 440..=459i32, Just(1071)]) {
            prop_assert_eq!(GroupCodeValueType::from_code(code), GroupCodeValueType::Int32);
        }

        #[test]
        fn int16_ranges(code in prop_oneof![60..=79i32, 170..=179i32, 270..=279i32, 370..=389i32, 400..=409i32, Just(1070)]) {
            prop_assert_eq!(GroupCodeValueType::from_code(code), GroupCodeValueType::Int16);
        }

        #[test]
        fn byte_and_int64_ranges(byte in 280..=299i32, wide in 160..=169i32) {
            prop_assert_eq!(GroupCodeValueType::from_code(byte), GroupCodeValueType::Byte);
            prop_assert_eq!(GroupCodeValueType::from_code(wide), GroupCodeValueType::Int64);
        }

        #[test]
        fn points_and_chunks(point in prop_oneof![10..=17i32, 110..=112i32, 210..=219i32, 1010..=1013i32, 1020..=1023i32, 1030..=1033i32],
                             chunk in prop_oneof![310..=319i32, Just(1004)]) {
            prop_assert_eq!(GroupCodeValueType::from_code(point), GroupCodeValueType::Point3D);
            prop_assert_eq!(GroupCodeValueType::from_code(chunk), GroupCodeValueType::Chunk);
        }

        #[test]
        fn references(handle in prop_oneof![Just(5), Just(105), 320..=329i32, Just(1005)],
                      soft in 330..=339i32, hard in prop_oneof![340..=349i32, 390..=399i32],
                      soft_owner in 350..=359i32, hard_owner in 360..=369i32) {
            prop_assert_eq!(GroupCodeValueType::from_code(handle), GroupCodeValueType::Handle);
            prop_assert_eq!(GroupCodeValueType::from_code(soft), GroupCodeValueType::SoftPointer);
            prop_assert_eq!(GroupCodeValueType::from_code(hard), GroupCodeValueType::HardPointer);
            prop_assert_eq!(GroupCodeValueType::from_code(soft_owner), GroupCodeValueType::SoftOwner);
            prop_assert_eq!(GroupCodeValueType::from_code(hard_owner), GroupCodeValueType::HardOwner);
        }

        #[test]
        fn strings(code in prop_oneof![Just(-4), 0..=4i32, 6..=9i32, 100..=102i32, 300..=309i32, 410..=419i32, 430..=439i32, 470..=479i32, Just(999), Just(1000), Just(1001), Just(1003)]) {
            prop_assert_eq!(GroupCodeValueType::from_code(code), GroupCodeValueType::String);
        }

        #[test]
        fn undocumented_codes_are_none(code in any::<i32>()) {
            let documented: &[(i32, i32)] = &[
                (-4, -4), (-2, 17), (38, 79), (90, 99), (100, 102), (105, 105), (110, 112),
                (140, 149), (160, 179), (210, 219), (270, 479), (999, 1005),
                (1010, 1013), (1020, 1023), (1030, 1033), (1040, 1042), (1070, 1071),
            ];
            let kind = GroupCodeValueType::from_code(code);
            if !in_ranges(code, documented) {
                prop_assert_eq!(kind, GroupCodeValueType::None);
            }
        }
    }
}
