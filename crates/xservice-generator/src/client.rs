//! Clients that call a service over HTTP, one per content type

use crate::framework::{
    Framework, FrameworkPackage, content_binding, context_type, http_client_pointer,
};
use crate::service::{ServiceModel, quoted};
use tracing::debug;
use xservice_codegen::{Block, Function, Method, Operator, SliceLiteral, StructLiteral, Structure};
use xservice_core::naming::unexported;
use xservice_core::{ContentType, GenResult, Parameter, TypeReference};

/// A client struct with its methods and the constructor returning it as
/// the service interface
pub(crate) struct ClientDeclarations {
    pub structure: Structure,
    pub constructor: Function,
}

pub(crate) fn client(
    service: &ServiceModel,
    framework: &Framework,
    content_type: ContentType,
) -> GenResult<ClientDeclarations> {
    let suffix = content_type.client_suffix();
    let struct_name = format!("{}{suffix}Client", unexported(&service.name));
    let http_client = framework.type_ref(FrameworkPackage::Transport, "HTTPClient")?;

    let mut structure = Structure::new(&struct_name)?.with_comment(&format!(
        "{struct_name} wraps an http.client and sends {suffix} objects"
    ));
    structure.add_field("client", http_client.clone())?;
    structure.add_field("urls", TypeReference::string().array(service.methods.len()))?;

    let constructor = constructor(service, &struct_name, suffix, http_client)?;

    let receiver = TypeReference::named(&struct_name)?.pointer();
    let binding = content_binding(content_type);
    for (i, method) in service.methods.iter().enumerate() {
        let mut body = Block::new();
        body.assign_call(
            &["ctx"],
            "xcontext.WithPackageName",
            &["ctx", &quoted(&service.schema_package)],
        )?
        .assign_call(&["ctx"], "xcontext.WithServiceName", &["ctx", &quoted(&service.name)])?
        .assign_call(&["ctx"], "xcontext.WithMethodName", &["ctx", &quoted(&method.name)])?
        .new_instance("out", &method.output)?
        .define_call(
            &["err"],
            binding.request,
            &["ctx", "c.client", &format!("c.urls[{i}]"), "in", "out"],
        )?
        .return_values(&["out", "err"])?;

        let input_name = method.input.name();
        let client_method = Method::new(
            "c",
            receiver.clone(),
            &method.name,
            vec![
                Parameter::new("ctx", context_type()?),
                Parameter::new("in", method.input.clone().pointer()),
            ],
            vec![method.output.clone().pointer(), TypeReference::error()],
        )?
        .with_comment(&format!(
            "{} sends an {input_name} {suffix} object to the server",
            method.name
        ))
        .with_body(body);
        structure.add_method(client_method);
    }

    debug!(
        service = %service.name,
        client = %struct_name,
        methods = service.methods.len(),
        "emitted client"
    );
    Ok(ClientDeclarations {
        structure,
        constructor,
    })
}

fn constructor(
    service: &ServiceModel,
    struct_name: &str,
    suffix: &str,
    http_client: TypeReference,
) -> GenResult<Function> {
    let name = format!("New{}{suffix}Client", service.name);

    let mut urls = SliceLiteral::array("urls", TypeReference::string())?;
    for method in &service.methods {
        urls.push(&format!("prefix + {}", quoted(&method.name)))?;
    }

    let mut redirectless = StructLiteral::new(TypeReference::named(struct_name)?);
    redirectless.field("client", "httpClient")?.field("urls", "urls")?;
    let mut plain = StructLiteral::new(TypeReference::named(struct_name)?);
    plain.field("client", "client")?.field("urls", "urls")?;

    let mut body = Block::new();
    // Go rejects unused locals, so a service without methods skips the prefix
    if !service.methods.is_empty() {
        body.define_call(&["URLBase"], "transport.UrlBase", &["addr"])?
            .define_operation("prefix", "URLBase", Operator::Add, &service.path_prefix_const())?;
    }
    body.slice_literal(&urls)?
        .type_assert(&["httpClient", "ok"], "client", &http_client_pointer()?)?
        .if_begin("ok", Operator::Equal, "true")?
        .assign_call(&["httpClient"], "transport.WithoutRedirects", &["httpClient"])?
        .struct_literal("return", &redirectless, true)?
        .close()
        .struct_literal("return", &plain, true)?;

    Ok(Function::new(
        &name,
        vec![
            Parameter::new("addr", TypeReference::string()),
            Parameter::new("client", http_client),
        ],
        vec![TypeReference::named(&service.name)?],
    )?
    .with_comment(&format!(
        "{name} constructs a new client, which wraps the http.client and implements {}",
        service.name
    ))
    .with_body(body))
}
