//! The closed catalog of detectable language features and the default
//! checker bundle.

use crate::check::{control_flow, data_structure, function, inheritance, special, style};
use crate::check::FeatureChecker;

/// Feature names the default bundle can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    // function semantics
    ReturningMultipleValue,
    Recursion,
    FirstClassFunction,
    PureFunction,
    ViewFunction,
    ConstantFunction,
    FunctionModifier,
    NamedCall,
    FreeFunction,
    ReturnVariable,
    FallbackFunction,
    ReceiveEtherFunction,
    FunctionOverloading,
    // control flow
    Loop,
    CrossContractInvocationHighLevel,
    CrossContractInvocationLowLevel,
    Send,
    Transfer,
    CreatingContractViaNew,
    ExceptionRequireAssertRevertThrow,
    ExceptionTryCatch,
    // object-oriented programming
    SingleInheritance,
    MultipleInheritance,
    SuperVirtualMethodLookup,
    FunctionOverriding,
    FunctionModifierOverriding,
    AbstractContract,
    Interface,
    FunctionVisibility,
    StateVariableVisibility,
    Library,
    // data structure
    Array,
    Struct,
    NestedArrayOrStruct,
    Enum,
    Event,
    ConstantAndImmutableStateVariable,
    // code style
    SpdxLicenseIdentifier,
    ImportRenaming,
    NatSpecComment,
    PragmaSolidityVersion,
    // special mechanism
    PragmaSmtChecker,
    ManualGasControl,
    InlineAssembly,
    UnicodeLiteral,
    HexadecimalLiteral,
    EtherUnit,
    TimeUnit,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::ReturningMultipleValue => "ReturningMultipleValue",
            Feature::Recursion => "Recursion",
            Feature::FirstClassFunction => "FirstClassFunction",
            Feature::PureFunction => "PureFunction",
            Feature::ViewFunction => "ViewFunction",
            Feature::ConstantFunction => "ConstantFunction",
            Feature::FunctionModifier => "FunctionModifier",
            Feature::NamedCall => "NamedCall",
            Feature::FreeFunction => "FreeFunction",
            Feature::ReturnVariable => "ReturnVariable",
            Feature::FallbackFunction => "FallbackFunction",
            Feature::ReceiveEtherFunction => "ReceiveEtherFunction",
            Feature::FunctionOverloading => "FunctionOverloading",
            Feature::Loop => "Loop",
            Feature::CrossContractInvocationHighLevel => "CrossContractInvocationHighLevel",
            Feature::CrossContractInvocationLowLevel => "CrossContractInvocationLowLevel",
            Feature::Send => "Send",
            Feature::Transfer => "Transfer",
            Feature::CreatingContractViaNew => "CreatingContractViaNew",
            Feature::ExceptionRequireAssertRevertThrow => "ExceptionRequireAssertRevertThrow",
            Feature::ExceptionTryCatch => "ExceptionTryCatch",
            Feature::SingleInheritance => "SingleInheritance",
            Feature::MultipleInheritance => "MultipleInheritance",
            Feature::SuperVirtualMethodLookup => "SuperVirtualMethodLookup",
            Feature::FunctionOverriding => "FunctionOverriding",
            Feature::FunctionModifierOverriding => "FunctionModifierOverriding",
            Feature::AbstractContract => "AbstractContract",
            Feature::Interface => "Interface",
            Feature::FunctionVisibility => "FunctionVisibility",
            Feature::StateVariableVisibility => "StateVariableVisibility",
            Feature::Library => "Library",
            Feature::Array => "Array",
            Feature::Struct => "Struct",
            Feature::NestedArrayOrStruct => "NestedArrayOrStruct",
            Feature::Enum => "Enum",
            Feature::Event => "Event",
            Feature::ConstantAndImmutableStateVariable => "ConstantAndImmutableStateVariable",
            Feature::SpdxLicenseIdentifier => "SpdxLicenseIdentifier",
            Feature::ImportRenaming => "ImportRenaming",
            Feature::NatSpecComment => "NatSpecComment",
            Feature::PragmaSolidityVersion => "PragmaSolidityVersion",
            Feature::PragmaSmtChecker => "PragmaSmtChecker",
            Feature::ManualGasControl => "ManualGasControl",
            Feature::InlineAssembly => "InlineAssembly",
            Feature::UnicodeLiteral => "UnicodeLiteral",
            Feature::HexadecimalLiteral => "HexadecimalLiteral",
            Feature::EtherUnit => "EtherUnit",
            Feature::TimeUnit => "TimeUnit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        ALL_FEATURES.iter().copied().find(|f| f.as_str() == s)
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every feature, in catalog order.
pub const ALL_FEATURES: &[Feature] = &[
    Feature::ReturningMultipleValue,
    Feature::Recursion,
    Feature::FirstClassFunction,
    Feature::PureFunction,
    Feature::ViewFunction,
    Feature::ConstantFunction,
    Feature::FunctionModifier,
    Feature::NamedCall,
    Feature::FreeFunction,
    Feature::ReturnVariable,
    Feature::FallbackFunction,
    Feature::ReceiveEtherFunction,
    Feature::FunctionOverloading,
    Feature::Loop,
    Feature::CrossContractInvocationHighLevel,
    Feature::CrossContractInvocationLowLevel,
    Feature::Send,
    Feature::Transfer,
    Feature::CreatingContractViaNew,
    Feature::ExceptionRequireAssertRevertThrow,
    Feature::ExceptionTryCatch,
    Feature::SingleInheritance,
    Feature::MultipleInheritance,
    Feature::SuperVirtualMethodLookup,
    Feature::FunctionOverriding,
    Feature::FunctionModifierOverriding,
    Feature::AbstractContract,
    Feature::Interface,
    Feature::FunctionVisibility,
    Feature::StateVariableVisibility,
    Feature::Library,
    Feature::Array,
    Feature::Struct,
    Feature::NestedArrayOrStruct,
    Feature::Enum,
    Feature::Event,
    Feature::ConstantAndImmutableStateVariable,
    Feature::SpdxLicenseIdentifier,
    Feature::ImportRenaming,
    Feature::NatSpecComment,
    Feature::PragmaSolidityVersion,
    Feature::PragmaSmtChecker,
    Feature::ManualGasControl,
    Feature::InlineAssembly,
    Feature::UnicodeLiteral,
    Feature::HexadecimalLiteral,
    Feature::EtherUnit,
    Feature::TimeUnit,
];

/// The default checker bundle, in catalog order.
pub fn default_checkers() -> Vec<FeatureChecker> {
    ALL_FEATURES
        .iter()
        .map(|feature| {
            let check = checker_for(*feature);
            FeatureChecker {
                name: feature.as_str().to_string(),
                check: Box::new(check),
            }
        })
        .collect()
}

fn checker_for(
    feature: Feature,
) -> fn(&crate::analysis::AnalysisContext) -> anyhow::Result<Vec<crate::analysis::FeatureSite>> {
    match feature {
        Feature::ReturningMultipleValue => function::check_returning_multiple_value,
        Feature::Recursion => function::check_recursion,
        Feature::FirstClassFunction => function::check_first_class_function,
        Feature::PureFunction => function::check_pure_function,
        Feature::ViewFunction => function::check_view_function,
        Feature::ConstantFunction => function::check_constant_function,
        Feature::FunctionModifier => function::check_function_modifier,
        Feature::NamedCall => function::check_named_call,
        Feature::FreeFunction => function::check_free_function,
        Feature::ReturnVariable => function::check_return_variable,
        Feature::FallbackFunction => function::check_fallback_function,
        Feature::ReceiveEtherFunction => function::check_receive_ether_function,
        Feature::FunctionOverloading => function::check_function_overloading,
        Feature::Loop => control_flow::check_loop,
        Feature::CrossContractInvocationHighLevel => {
            control_flow::check_cross_contract_invocation_high_level
        }
        Feature::CrossContractInvocationLowLevel => {
            control_flow::check_cross_contract_invocation_low_level
        }
        Feature::Send => control_flow::check_send,
        Feature::Transfer => control_flow::check_transfer,
        Feature::CreatingContractViaNew => control_flow::check_creating_contract_via_new,
        Feature::ExceptionRequireAssertRevertThrow => {
            control_flow::check_exception_require_assert_revert_throw
        }
        Feature::ExceptionTryCatch => control_flow::check_exception_try_catch,
        Feature::SingleInheritance => inheritance::check_single_inheritance,
        Feature::MultipleInheritance => inheritance::check_multiple_inheritance,
        Feature::SuperVirtualMethodLookup => inheritance::check_super_virtual_method_lookup,
        Feature::FunctionOverriding => inheritance::check_function_overriding,
        Feature::FunctionModifierOverriding => inheritance::check_function_modifier_overriding,
        Feature::AbstractContract => inheritance::check_abstract_contract,
        Feature::Interface => inheritance::check_interface,
        Feature::FunctionVisibility => function::check_function_visibility,
        Feature::StateVariableVisibility => inheritance::check_state_variable_visibility,
        Feature::Library => inheritance::check_library,
        Feature::Array => data_structure::check_array,
        Feature::Struct => data_structure::check_struct,
        Feature::NestedArrayOrStruct => data_structure::check_nested_array_or_struct,
        Feature::Enum => data_structure::check_enum,
        Feature::Event => data_structure::check_event,
        Feature::ConstantAndImmutableStateVariable => {
            data_structure::check_constant_and_immutable_state_variable
        }
        Feature::SpdxLicenseIdentifier => style::check_spdx_license_identifier,
        Feature::ImportRenaming => style::check_import_renaming,
        Feature::NatSpecComment => style::check_natspec_comment,
        Feature::PragmaSolidityVersion => style::check_pragma_solidity_version,
        Feature::PragmaSmtChecker => special::check_pragma_smt_checker,
        Feature::ManualGasControl => special::check_manual_gas_control,
        Feature::InlineAssembly => special::check_inline_assembly,
        Feature::UnicodeLiteral => special::check_unicode_literal,
        Feature::HexadecimalLiteral => special::check_hexadecimal_literal,
        Feature::EtherUnit => special::check_ether_unit,
        Feature::TimeUnit => special::check_time_unit,
    }
}
