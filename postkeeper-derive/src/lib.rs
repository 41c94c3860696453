use proc_macro::{self, TokenStream};
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Marks a type as usable for router state. The type must also be `Clone`,
/// `Send` and `Sync`.
#[proc_macro_derive(BotState)]
pub fn postkeeper_derive_botstate(input: TokenStream) -> TokenStream {
    let DeriveInput { ident, .. } = parse_macro_input!(input);
    let output = quote! {
        impl postkeeper::handler::BotState for #ident {}
    };
    output.into()
}

/// Marks an `api` struct as a Bot API request body. Must be used from a
/// module directly under `api`, whose parent re-exports `Request`.
#[proc_macro_derive(BotRequest)]
pub fn postkeeper_derive_request(input: TokenStream) -> TokenStream {
    let DeriveInput { ident, .. } = parse_macro_input!(input);
    let output = quote! {
        impl super::Request for #ident {}
    };
    output.into()
}
