mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `ErrorKind` trait from `exex-error` for the given struct.
///
/// The report produced for the error is customized through the `error` attribute:
/// ```ignore
/// use exex_attrs::ErrorKind;
/// use exex_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of input", labels = ["add a term here"])]
/// pub struct UnexpectedEof;
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                     |
/// | --------- | ------------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the report.                                 |
/// | `labels`  | An array of label texts; the `i`th label points at the `i`th span of the error. |
/// | `help`    | Optional text describing what the user can do to fix the error.                 |
/// | `note`    | Optional extra information shown below the help text.                           |
///
/// Each tag accepts an expression evaluating to something that implements [`ToString`]. The
/// expressions are evaluated inside the generated method, so `self` can be used to refer to
/// the fields of the error. An empty label string leaves its span highlighted without text.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    let generics = &target.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    quote! {
        impl #impl_generics ErrorKind for #name #ty_generics #where_clause {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
