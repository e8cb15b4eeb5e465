extern crate proc_macro;

use proc_macro::TokenStream;

mod define_object_id;

/// Define the typed identifier newtypes for backend objects, along with a sum
/// type able to hold any of them.
///
/// ```ignore
/// object_ids!(ObjectId {
///     Guild: snowflake;
///     Channel: snowflake;
/// });
/// ```
///
/// Each `Name: snowflake;` entry produces `NameId(Snowflake)`; an entry may
/// instead give an explicit tuple of contents, e.g. `Pair: (u32, u32);`.
/// `Snowflake` and `WrongIdTypeError` must be in scope at the call site.
#[proc_macro]
pub fn object_ids(input: TokenStream) -> TokenStream
{
    define_object_id::object_ids(input)
}
