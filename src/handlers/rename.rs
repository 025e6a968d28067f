//! `rename|<name>`: change the sender's display name.

use super::Context;
use crate::error::{HandlerError, HandlerResult};
use crate::state::is_reserved;
use relay_proto::Reply;
use tracing::info;

pub fn handle_rename(ctx: &Context<'_>, new_name: &str) -> HandlerResult {
    if is_reserved(new_name) {
        return Err(HandlerError::ReservedName(new_name.to_string()));
    }
    let old_name = ctx.session.name();
    if !ctx.hub.registry.rename(ctx.session, new_name) {
        return Err(HandlerError::NameInUse(new_name.to_string()));
    }

    info!(addr = %ctx.session.addr(), old = %old_name, new = %new_name, "Session renamed");
    ctx.reply(Reply::Renamed(new_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{drain, hub, join};
    use super::*;

    #[test]
    fn test_rename_success_confirms() {
        let (hub, mut queue) = hub();
        let (a, mut a_out) = join(&hub, &mut queue, "10.0.0.1:100");

        handle_rename(&Context::new(&hub, &a), "ann").unwrap();

        assert_eq!(a.name(), "ann");
        assert_eq!(drain(&mut a_out), vec!["you are now known as ann".to_string()]);
        assert_eq!(hub.registry.names(), vec!["ann".to_string()]);
    }

    #[test]
    fn test_rename_collision_leaves_registry_alone() {
        let (hub, mut queue) = hub();
        let (a, mut a_out) = join(&hub, &mut queue, "10.0.0.1:100");
        let (b, _b_out) = join(&hub, &mut queue, "10.0.0.2:200");
        handle_rename(&Context::new(&hub, &b), "bea").unwrap();
        let before = hub.registry.names();

        let err = handle_rename(&Context::new(&hub, &a), "bea").unwrap_err();

        assert!(matches!(&err, HandlerError::NameInUse(n) if n == "bea"));
        assert_eq!(
            err.to_reply().map(|r| r.to_string()),
            Some("name bea is already in use".to_string())
        );
        assert_eq!(a.name(), "10.0.0.1:100");
        assert_eq!(hub.registry.names(), before);
        assert!(drain(&mut a_out).is_empty());
    }

    #[test]
    fn test_address_shaped_name_is_refused() {
        let (hub, mut queue) = hub();
        let (a, mut a_out) = join(&hub, &mut queue, "10.0.0.1:100");

        let err = handle_rename(&Context::new(&hub, &a), "10.0.0.9:9").unwrap_err();
        assert!(matches!(&err, HandlerError::ReservedName(n) if n == "10.0.0.9:9"));
        assert_eq!(a.name(), "10.0.0.1:100");
        assert!(drain(&mut a_out).is_empty());

        // A connection from that address still joins without displacing `a`.
        let (_b, _b_out) = join(&hub, &mut queue, "10.0.0.9:9");
        assert_eq!(
            hub.registry.names(),
            vec!["10.0.0.1:100".to_string(), "10.0.0.9:9".to_string()]
        );
        assert!(hub.offline(&a));
        assert_eq!(queue.try_recv().unwrap(), "[10.0.0.1:100]10.0.0.1:100: left");
    }
}
