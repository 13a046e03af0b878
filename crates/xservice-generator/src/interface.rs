//! The Go interface a service implementation satisfies

use crate::framework::context_type;
use crate::service::ServiceModel;
use xservice_codegen::Interface;
use xservice_core::{GenResult, Parameter, TypeReference};

/// `type <Service> interface { Method(ctx context.Context, req *In) (*Out, error) }`
pub(crate) fn service_interface(service: &ServiceModel) -> GenResult<Interface> {
    let mut interface = Interface::new(&service.name)?.with_comment(service.interface_comment());
    for method in &service.methods {
        let comment = method
            .comment
            .as_ref()
            .map(|lines| lines.join(" "))
            .unwrap_or_default();
        interface.add_method(
            &method.name,
            vec![
                Parameter::new("ctx", context_type()?),
                Parameter::new("req", method.input.clone().pointer()),
            ],
            vec![method.output.clone().pointer(), TypeReference::error()],
            &comment,
        )?;
    }
    Ok(interface)
}
