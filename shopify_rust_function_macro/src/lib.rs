use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, parse_quote, Expr, FnArg, Token,
};

#[derive(Clone, Default)]
struct ShopifyFunctionArgs {
    input_stream: Option<Expr>,
    output_stream: Option<Expr>,
}

impl ShopifyFunctionArgs {
    fn parse<K: Parse, V: Parse>(input: &ParseStream<'_>) -> syn::Result<V> {
        input.parse::<K>()?;
        input.parse::<Token![=]>()?;
        let value: V = input.parse()?;
        if input.lookahead1().peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        Ok(value)
    }
}

impl Parse for ShopifyFunctionArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();
        while !input.is_empty() {
            let lookahead = input.lookahead1();
            if lookahead.peek(kw::input_stream) {
                args.input_stream = Some(Self::parse::<kw::input_stream, Expr>(&input)?);
            } else if lookahead.peek(kw::output_stream) {
                args.output_stream = Some(Self::parse::<kw::output_stream, Expr>(&input)?);
            } else {
                return Err(lookahead.error());
            }
        }
        Ok(args)
    }
}

mod kw {
    syn::custom_keyword!(input_stream);
    syn::custom_keyword!(output_stream);
}

/// Generates the `main` of a Function binary around the annotated function.
///
/// `main` decodes the input from STDIN, calls the function, and encodes its
/// result to STDOUT. Both streams can be replaced with `input_stream = <expr>`
/// and `output_stream = <expr>`, where the expressions implement `Read` and
/// `Write` respectively.
#[proc_macro_attribute]
pub fn shopify_function(attr: TokenStream, item: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(item as syn::ItemFn);
    let args = parse_macro_input!(attr as ShopifyFunctionArgs);

    let name = &ast.sig.ident;
    if ast.sig.inputs.len() != 1 {
        return quote! {compile_error!("Shopify functions need exactly one input parameter");}
            .into();
    }

    if let Some(FnArg::Receiver(_)) = ast.sig.inputs.first() {
        return quote! {compile_error!("Shopify functions can’t have a receiver");}.into();
    }

    let input_stream = args
        .input_stream
        .unwrap_or_else(|| parse_quote! { std::io::stdin() });
    let output_stream = args
        .output_stream
        .unwrap_or_else(|| parse_quote! { std::io::stdout().lock() });

    let gen = quote! {
        fn main() -> ::shopify_rust_function::Result<()> {
            ::shopify_rust_function::run_function(#name, #input_stream, #output_stream)
        }
        #ast
    };

    gen.into()
}
