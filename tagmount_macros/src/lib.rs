use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr, Token, Type};

// Mirrors tagmount::tag::MIDDLEWARE_MARKER. The macro only classifies the
// first token to pick an Action variant; full grammar validation stays in
// the runtime parser, so a malformed tag compiles and then fails the mount
// pass like any hand-written manifest.
const MIDDLEWARE_MARKER: &str = "USE";

struct ControllerArgs {
    path: LitStr,
    actions: bool,
}

impl Parse for ControllerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut path: Option<LitStr> = None;
        let mut actions = false;
        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            match ident.to_string().as_str() {
                "path" => {
                    input.parse::<Token![=]>()?;
                    path = Some(input.parse()?);
                }
                "actions" => actions = true,
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unexpected option {}", other),
                    ))
                }
            }
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        let path = path.ok_or_else(|| {
            syn::Error::new(Span::call_site(), "missing path = \"/prefix\" option")
        })?;
        Ok(ControllerArgs { path, actions })
    }
}

struct MountField {
    ident: Ident,
    tag: LitStr,
    ty: Type,
}

impl MountField {
    fn is_middleware(&self) -> bool {
        self.tag.value().split_whitespace().next() == Some(MIDDLEWARE_MARKER)
    }

    fn is_tagged(&self) -> bool {
        !self.tag.value().trim().is_empty()
    }
}

#[proc_macro_derive(Controller, attributes(mount))]
pub fn derive_controller(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Controller cannot be derived for generic structs",
        ));
    }

    let args = controller_args(input)?;
    let fields = mount_fields(input)?;

    // Manifest entries in declaration order; declaration order is
    // registration order.
    let entries = fields.iter().map(|f| {
        let field_name = f.ident.to_string();
        let tag = &f.tag;
        let kind = if f.is_middleware() {
            quote!(::tagmount::HandlerKind::Middleware)
        } else {
            quote!(::tagmount::HandlerKind::Route)
        };
        quote! { ::tagmount::FieldSpec::new(#field_name, #kind, #tag) }
    });

    // Tier-2 lookup arms. Untagged (empty-tag) fields are skipped by the
    // parser before resolution, so they get no arm.
    let arms: Vec<proc_macro2::TokenStream> = fields
        .iter()
        .filter(|f| f.is_tagged())
        .map(|f| {
            let field_name = f.ident.to_string();
            let ident = &f.ident;
            let variant = if f.is_middleware() {
                quote!(Middleware)
            } else {
                quote!(Route)
            };
            if option_inner(&f.ty).is_some() {
                quote! { #field_name => self.#ident.clone().map(::tagmount::Action::#variant), }
            } else {
                quote! { #field_name => ::std::option::Option::Some(::tagmount::Action::#variant(self.#ident.clone())), }
            }
        })
        .collect();

    let field_handler_body = if arms.is_empty() {
        quote! {
            let _ = name;
            ::std::option::Option::None
        }
    } else {
        quote! {
            match name {
                #(#arms)*
                _ => ::std::option::Option::None,
            }
        }
    };

    // Pin the group's associated types to the field types actually used, so
    // a controller with mixed-up handler types fails to compile instead of
    // failing to mount.
    let route_ty = fields
        .iter()
        .find(|f| f.is_tagged() && !f.is_middleware())
        .map(|f| unwrapped(&f.ty));
    let middleware_ty = fields
        .iter()
        .find(|f| f.is_tagged() && f.is_middleware())
        .map(|f| unwrapped(&f.ty));

    let mut constraints = Vec::new();
    if let Some(ty) = route_ty {
        constraints.push(quote!(Route = #ty));
    }
    if let Some(ty) = middleware_ty {
        constraints.push(quote!(Middleware = #ty));
    }
    let group_bound = if constraints.is_empty() {
        quote!(::tagmount::RouteGroup)
    } else {
        quote!(::tagmount::RouteGroup<#(#constraints),*>)
    };

    let actions_bound = args
        .actions
        .then(|| quote!(Self: ::tagmount::Actions<G>,));
    let action_method = args.actions.then(|| {
        quote! {
            fn action(&self, name: &str) -> ::std::option::Option<::tagmount::Action<G>> {
                ::tagmount::Actions::action(self, name)
            }
        }
    });

    let path = &args.path;
    Ok(quote! {
        impl<G> ::tagmount::Controller<G> for #name
        where
            G: #group_bound,
            #actions_bound
        {
            fn path(&self) -> &str {
                #path
            }

            fn manifest(&self) -> ::std::vec::Vec<::tagmount::FieldSpec> {
                ::std::vec![#(#entries),*]
            }

            #action_method

            fn field_handler(&self, name: &str) -> ::std::option::Option<::tagmount::Action<G>> {
                #field_handler_body
            }
        }
    })
}

fn controller_args(input: &DeriveInput) -> syn::Result<ControllerArgs> {
    for attr in &input.attrs {
        if attr.path().is_ident("mount") {
            return attr.parse_args::<ControllerArgs>();
        }
    }
    Err(syn::Error::new_spanned(
        &input.ident,
        "missing #[mount(path = \"/prefix\")] attribute",
    ))
}

fn mount_fields(input: &DeriveInput) -> syn::Result<Vec<MountField>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Controller requires a struct",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Controller requires named struct fields",
        ));
    };

    let mut fields = Vec::new();
    for field in &named.named {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("mount")) else {
            continue;
        };
        let tag: LitStr = attr.parse_args()?;
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        fields.push(MountField {
            ident,
            tag,
            ty: field.ty.clone(),
        });
    }
    Ok(fields)
}

fn unwrapped(ty: &Type) -> &Type {
    option_inner(ty).unwrap_or(ty)
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(p) = ty else {
        return None;
    };
    let seg = p.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    match args.args.first() {
        Some(syn::GenericArgument::Type(inner)) => Some(inner),
        _ => None,
    }
}
