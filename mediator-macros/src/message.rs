//! Message derive macros.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    DeriveInput, Ident, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments of the `#[request(...)]` attribute.
pub(crate) struct RequestArgs {
    pub response: Type,
}

impl Parse for RequestArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut response = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "response" => {
                    if response.is_some() {
                        return Err(syn::Error::new(
                            ident.span(),
                            "duplicate `response` argument",
                        ));
                    }
                    response = Some(input.parse::<Type>()?);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown argument `{other}`, expected `response`"),
                    ));
                }
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        response
            .map(|response| RequestArgs { response })
            .ok_or_else(|| input.error("missing `response = Type` argument"))
    }
}

fn request_args(input: &DeriveInput) -> syn::Result<RequestArgs> {
    let mut found = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("request") {
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "`#[request(...)]` may only be given once",
            ));
        }
        found = Some(attr.parse_args::<RequestArgs>()?);
    }

    found.ok_or_else(|| {
        syn::Error::new_spanned(
            &input.ident,
            "`#[derive(Request)]` requires `#[request(response = Type)]`",
        )
    })
}

pub(crate) fn derive_request_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let args = match request_args(&input) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    let name = &input.ident;
    let response = &args.response;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::mediator::Request for #name #ty_generics #where_clause {
            type Response = #response;
        }
    };

    TokenStream::from(expanded)
}

pub(crate) fn derive_notification_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::mediator::Notification for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}
