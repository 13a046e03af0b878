//! The HTTP handler that routes requests to a service implementation
//!
//! Request flow through the generated server:
//! 1. `ServeHTTP` runs the received hook, rejects anything but POST and
//!    switches on the exact URL path
//! 2. `serve<Method>` picks a decoder and encoder from the `Content-Type`
//!    media type
//! 3. `serve<Method>Content` decodes, calls the implementation behind a
//!    panic guard, rejects nil responses and encodes the result, running
//!    the routed, prepared and sent hooks on the way

use crate::framework::{
    Framework, FrameworkPackage, content_binding, context_type, request_pointer, response_writer,
};
use crate::service::{MethodModel, ServiceModel, quoted};
use tracing::debug;
use xservice_codegen::{
    AnonymousFunc, Block, Comment, Const, Function, Method, Operator, StructLiteral, Structure,
    Switch,
};
use xservice_core::{ContentType, GenResult, Parameter, Primitive, TypeReference, wire};

/// Declarations making up one service's server
pub(crate) struct ServerDeclarations {
    pub path_prefix: Const,
    pub structure: Structure,
    pub constructor: Function,
}

/// Values the server accessors return
pub(crate) struct ServerMetadata<'a> {
    pub descriptor_var: &'a str,
    pub version: &'a str,
}

struct ServerScope<'a> {
    service: &'a ServiceModel,
    receiver: TypeReference,
}

impl ServerScope<'_> {
    fn method(
        &self,
        name: &str,
        params: Vec<Parameter>,
        returns: Vec<TypeReference>,
    ) -> GenResult<Method> {
        Method::new("s", self.receiver.clone(), name, params, returns)
    }
}

fn handler_params() -> GenResult<Vec<Parameter>> {
    Ok(vec![
        Parameter::new("ctx", context_type()?),
        Parameter::new("resp", response_writer()?),
        Parameter::new("req", request_pointer()?),
    ])
}

/// `s.writeError(ctx, resp, <err>)` followed by a bare `return`
fn write_error_and_return(body: &mut Block, err: &str) -> GenResult<()> {
    body.call("s.writeError", &["ctx", "resp", err])?.ret();
    Ok(())
}

/// Build a bad route error from a formatted message and write it
fn bad_route(body: &mut Block, format: &str, value: &str) -> GenResult<()> {
    body.define_call(&["msg"], "fmt.Sprintf", &[quoted(format).as_str(), value])?
        .define_call(
            &["terr"],
            "errors.BadRouteError",
            &["msg", "req.Method", "req.URL.Path"],
        )?
        .call("s.writeError", &["ctx", "resp", "terr"])?;
    Ok(())
}

/// `if err != nil { s.writeError(ctx, resp, err); return }`
fn fail_on_error(body: &mut Block) -> GenResult<()> {
    body.if_begin("err", Operator::NotEqual, "nil")?;
    write_error_and_return(body, "err")?;
    body.close();
    Ok(())
}

pub(crate) fn server(
    service: &ServiceModel,
    framework: &Framework,
    content_types: &[ContentType],
    metadata: &ServerMetadata<'_>,
) -> GenResult<ServerDeclarations> {
    let struct_name = service.server_struct();
    let scope = ServerScope {
        service,
        receiver: TypeReference::named(&struct_name)?.pointer(),
    };
    let hooks = framework
        .type_ref(FrameworkPackage::Hooks, "ServerHooks")?
        .pointer();
    let log_error = framework.type_ref(FrameworkPackage::Transport, "LogErrorFunc")?;

    let mut structure = Structure::new(&struct_name)?
        .with_comment(&format!("{struct_name} wraps an endpoint and implements http.Handler."));
    structure
        .add_embedded(TypeReference::named(&service.name)?)
        .add_field("hooks", hooks.clone())?
        .add_field("logErrorFunc", log_error.clone())?;

    let constructor = constructor(service, framework, &struct_name, hooks, log_error)?;

    structure.add_method(write_error(&scope)?);
    structure.add_method(serve_http(&scope)?);
    for method in &service.methods {
        structure.add_method(dispatcher(&scope, method, content_types)?);
        structure.add_method(content_handler(&scope, method, framework)?);
    }
    for accessor in accessors(&scope, metadata)? {
        structure.add_method(accessor);
    }

    debug!(
        service = %service.name,
        server = %struct_name,
        routes = service.methods.len(),
        "emitted server"
    );
    Ok(ServerDeclarations {
        path_prefix: path_prefix_const(service)?,
        structure,
        constructor,
    })
}

fn path_prefix_const(service: &ServiceModel) -> GenResult<Const> {
    let name = service.path_prefix_const();
    let mut comment = Comment::new();
    comment
        .line(format!(
            "{name} is used for all URL paths on a {} server.",
            service.name
        ))
        .line(format!("Requests are always: POST {name} /method"))
        .line("It can be used in an HTTP mux to route requests");
    Ok(
        Const::new(&name, TypeReference::string(), &quoted(&service.path_prefix))?
            .with_comment(comment),
    )
}

fn constructor(
    service: &ServiceModel,
    framework: &Framework,
    struct_name: &str,
    hooks: TypeReference,
    log_error: TypeReference,
) -> GenResult<Function> {
    let name = format!("New{}Server", service.name);

    let mut literal = StructLiteral::new(TypeReference::named(struct_name)?);
    literal
        .field(&service.name, "svc")?
        .field("hooks", "hooks")?;

    let mut body = Block::new();
    body.struct_literal("server :=", &literal, true)?
        .if_begin("len(errorFunc)", Operator::Equal, "1")?
        .struct_field_assign("server", "logErrorFunc", "errorFunc[0]")?
        .else_branch()
        .struct_field_assign("server", "logErrorFunc", "log.Printf")?
        .close()
        .return_values(&["server"])?;

    Ok(Function::new(
        &name,
        vec![
            Parameter::new("svc", TypeReference::named(&service.name)?),
            Parameter::new("hooks", hooks),
            Parameter::new("errorFunc", log_error.variadic()),
        ],
        vec![framework.type_ref(FrameworkPackage::Server, "Server")?],
    )?
    .with_comment(&format!(
        "{name} constructs a new server, and implements {}",
        service.name
    ))
    .with_body(body))
}

fn write_error(scope: &ServerScope<'_>) -> GenResult<Method> {
    let mut body = Block::new();
    body.call(
        "transport.WriteErrorAndTriggerHooks",
        &["ctx", "resp", "err", "s.hooks"],
    )?;
    Ok(scope
        .method(
            "writeError",
            vec![
                Parameter::new("ctx", context_type()?),
                Parameter::new("resp", response_writer()?),
                Parameter::new("err", TypeReference::error()),
            ],
            Vec::new(),
        )?
        .with_body(body))
}

fn serve_http(scope: &ServerScope<'_>) -> GenResult<Method> {
    let service = scope.service;
    let mut body = Block::new();
    body.define_call(&["ctx"], "req.Context", &[])?
        .assign_call(
            &["ctx"],
            "xcontext.WithPackageName",
            &["ctx", &quoted(&service.schema_package)],
        )?
        .assign_call(&["ctx"], "xcontext.WithServiceName", &["ctx", &quoted(&service.name)])?
        .assign_call(&["ctx"], "xcontext.WithResponseWriter", &["ctx", "resp"])?
        .declare_var("err", &TypeReference::error())?
        .assign_call(&["ctx", "err"], "transport.CallRequestReceived", &["ctx", "s.hooks"])?;
    fail_on_error(&mut body)?;

    body.if_begin("req.Method", Operator::NotEqual, "http.MethodPost")?;
    bad_route(&mut body, wire::UNSUPPORTED_METHOD_FORMAT, "req.Method")?;
    body.ret().close();

    let mut routes = Switch::on_value("req.URL.Path")?;
    for method in &service.methods {
        let mut case = Block::new();
        case.call(&format!("s.{}", method.dispatcher()), &["ctx", "resp", "req"])?
            .ret();
        let path = quoted(&service.method_path(method));
        routes.case(&[path.as_str()], case)?;
    }
    let mut fallback = Block::new();
    bad_route(&mut fallback, wire::NO_HANDLER_FORMAT, "req.URL.Path")?;
    fallback.ret();
    routes.default_case(fallback);
    body.switch(&routes)?;

    Ok(scope
        .method(
            "ServeHTTP",
            vec![
                Parameter::new("resp", response_writer()?),
                Parameter::new("req", request_pointer()?),
            ],
            Vec::new(),
        )?
        .with_comment("ServeHTTP implements http.Handler.")
        .with_body(body))
}

fn dispatcher(
    scope: &ServerScope<'_>,
    method: &MethodModel,
    content_types: &[ContentType],
) -> GenResult<Method> {
    let name = method.dispatcher();
    let handler = format!("s.{}", method.content_handler());

    let mut body = Block::new();
    body.define_call(&["header"], "req.Header.Get", &["xhttp.ContentTypeHeader"])?
        .define_call(&["i"], "strings.Index", &["header", "\";\""])?
        .if_begin("i", Operator::Equal, "-1")?
        .assign_call(&["i"], "len", &["header"])?
        .close()
        .define_call(&["modifiedHeader"], "strings.ToLower", &["header[:i]"])?
        .assign_call(&["modifiedHeader"], "strings.TrimSpace", &["modifiedHeader"])?;

    for (n, content_type) in content_types.iter().enumerate() {
        let binding = content_binding(*content_type);
        let media_type = quoted(content_type.media_type());
        if n == 0 {
            body.if_begin("modifiedHeader", Operator::Equal, &media_type)?;
        } else {
            body.else_if("modifiedHeader", Operator::Equal, &media_type)?;
        }
        body.call(
            &handler,
            &["ctx", "resp", "req", binding.decoder, binding.encoder],
        )?
        .ret();
    }
    body.else_branch();
    bad_route(&mut body, wire::UNEXPECTED_CONTENT_TYPE_FORMAT, "header")?;
    body.close();

    Ok(scope
        .method(&name, handler_params()?, Vec::new())?
        .with_comment(&format!(
            "{name} is used to set a decoder and encoder for a given content type"
        ))
        .with_body(body))
}

fn content_handler(
    scope: &ServerScope<'_>,
    method: &MethodModel,
    framework: &Framework,
) -> GenResult<Method> {
    let name = method.content_handler();
    let output = method.output.clone().pointer();

    let mut body = Block::new();
    body.declare_var("err", &TypeReference::error())?
        .assign_call(&["ctx"], "xcontext.WithMethodName", &["ctx", &quoted(&method.name)])?
        .assign_call(&["ctx", "err"], "transport.CallRequestRouted", &["ctx", "s.hooks"])?;
    fail_on_error(&mut body)?;
    body.defer_call("transport.Closebody", &["req.Body", "s.logErrorFunc"])?
        .new_instance("reqContent", &method.input)?;

    let decode = Block::call_expr(&["err"], "decodeRequest", &["ctx", "req", "reqContent"])?;
    body.if_scoped_begin(&decode, "err", Operator::NotEqual, "nil")?
        .call("s.logErrorFunc", &["\"%v\"", "err"])?;
    write_error_and_return(&mut body, "err")?;
    body.close();

    let mut on_panic = Block::new();
    on_panic
        .define_call(&["terr"], "errors.InternalError", &["\"Internal service panic\""])?
        .call("s.writeError", &["ctx", "resp", "terr"])?;
    let mut endpoint = AnonymousFunc::new(
        "endpointWrapper",
        Vec::new(),
        vec![output.clone(), TypeReference::error()],
    )?;
    endpoint
        .body_mut()
        .recover_guard("deferWrapper", &on_panic)?
        .return_call(&format!("s.{}", method.name), &["ctx", "reqContent"])?;
    body.nested_func(&endpoint)?
        .define_call(&["respContent", "err"], "endpointWrapper", &[])?;
    fail_on_error(&mut body)?;

    let nil_response = quoted(&format!(
        "received a nil {}, and nil error while calling {}. nil responses are not supported",
        output.name(),
        method.name
    ));
    body.if_begin("respContent", Operator::Equal, "nil")?
        .define_call(&["terr"], "errors.InternalError", &[nil_response.as_str()])?
        .call("s.logErrorFunc", &["\"%v\"", "terr"])?;
    write_error_and_return(&mut body, "terr")?;
    body.close();

    let encode = Block::call_expr(&["err"], "encodeResponse", &["ctx", "resp", "respContent"])?;
    body.assign_call(&["ctx"], "transport.CallResponsePrepared", &["ctx", "s.hooks"])?
        .if_scoped_begin(&encode, "err", Operator::NotEqual, "nil")?
        .call("s.logErrorFunc", &["\"%v\"", "err"])?;
    write_error_and_return(&mut body, "err")?;
    body.close()
        .call("transport.CallResponseSent", &["ctx", "s.hooks"])?;

    let mut params = handler_params()?;
    params.push(Parameter::new(
        "decodeRequest",
        framework.type_ref(FrameworkPackage::Transport, "DecodeRequestFunc")?,
    ));
    params.push(Parameter::new(
        "encodeResponse",
        framework.type_ref(FrameworkPackage::Transport, "EncodeResponseFunc")?,
    ));
    Ok(scope
        .method(&name, params, Vec::new())?
        .with_comment(&format!("{name} sends object to requester"))
        .with_body(body))
}

fn accessors(scope: &ServerScope<'_>, metadata: &ServerMetadata<'_>) -> GenResult<Vec<Method>> {
    let index = scope.service.index.to_string();
    let mut descriptor_body = Block::new();
    descriptor_body.return_values(&[metadata.descriptor_var, index.as_str()])?;
    let descriptor = scope
        .method(
            "ServiceDescriptor",
            Vec::new(),
            vec![
                TypeReference::primitive(Primitive::Byte).slice(),
                TypeReference::primitive(Primitive::Int),
            ],
        )?
        .with_comment("ServiceDescriptor describes a service.")
        .with_body(descriptor_body);

    let mut version_body = Block::new();
    let version_literal = quoted(metadata.version);
    version_body.return_values(&[version_literal.as_str()])?;
    let version = scope
        .method(
            "ProtocGenXServiceVersion",
            Vec::new(),
            vec![TypeReference::string()],
        )?
        .with_comment(
            "ProtocGenXServiceVersion returns which xservice version was used to generate that service",
        )
        .with_body(version_body);

    Ok(vec![descriptor, version])
}
