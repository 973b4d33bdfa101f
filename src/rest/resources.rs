//! The built-in Kazoo resource table.
//!
//! Each function below describes one Kazoo collection. [`Registry::builtin`]
//! registers all of them; the resulting operation names form the default
//! surface of [`KazooClient`](crate::KazooClient).
//!
//! | Resource             | Path                                                                  |
//! |----------------------|-----------------------------------------------------------------------|
//! | `access_list`        | `/accounts/{account_id}/access_lists/{ignored}`                       |
//! | `account`            | `/accounts/{account_id}`                                              |
//! | `acdc_call_stat`     | `/accounts/{account_id}/acdc_call_stats/{ignored}`                    |
//! | `acl`                | `/accounts/{account_id}/acls/{ignored}`                               |
//! | `agent`              | `/accounts/{account_id}/agents/{agent_id}`                            |
//! | `alert`              | `/accounts/{account_id}/alerts/{alert_id}`                            |
//! | `apps_link`          | `/accounts/{account_id}/apps_link/authorize/{ignored}`                |
//! | `apps_store`         | `/accounts/{account_id}/apps_store/{app_id}`                          |
//! | `blacklist`          | `/accounts/{account_id}/blacklists/{blacklist_id}`                    |
//! | `braintree`          | `/accounts/{account_id}/braintree/{ignored}`                          |
//! | `bulk`               | `/accounts/{account_id}/bulk/{ignored}`                               |
//! | `call_inspector`     | `/accounts/{account_id}/call_inspector/{call_id}`                     |
//! | `callflow`           | `/accounts/{account_id}/callflows/{callflow_id}`                      |
//! | `cccp`               | `/accounts/{account_id}/cccps/{cccp_id}`                              |
//! | `cdr`                | `/accounts/{account_id}/cdrs/{cdr_id}`                                |
//! | `channel`            | `/accounts/{account_id}/channels/{channel_id}`                        |
//! | `clicktocall`        | `/accounts/{account_id}/clicktocall/{clicktocall_id}`                 |
//! | `comment`            | `/accounts/{account_id}/comments/{comment_id}`                        |
//! | `conference`         | `/accounts/{account_id}/conferences/{conference_id}`                  |
//! | `config`             | `/accounts/{account_id}/configs/{config_id}`                          |
//! | `connectivity`       | `/accounts/{account_id}/connectivity/{connectivity_id}`               |
//! | `contact_list`       | `/accounts/{account_id}/contact_list/{ignored}`                       |
//! | `device`             | `/accounts/{account_id}/devices/{device_id}`                          |
//! | `directory`          | `/accounts/{account_id}/directories/{directory_id}`                   |
//! | `fax`                | `/accounts/{account_id}/faxes/{fax_id}`                               |
//! | `faxbox`             | `/accounts/{account_id}/faxboxes/{faxbox_id}`                         |
//! | `freeswitch`         | `/accounts/{account_id}/freeswitch/{ignored}`                         |
//! | `global_resource`    | `/accounts/{account_id}/global_resources/{resource_id}`               |
//! | `group`              | `/accounts/{account_id}/groups/{group_id}`                            |
//! | `hotdesk`            | `/accounts/{account_id}/hotdesks/{ignored}`                           |
//! | `ip`                 | `/accounts/{account_id}/ips/{ip}`                                     |
//! | `limit`              | `/accounts/{account_id}/limits/{ignored}`                             |
//! | `list`               | `/accounts/{account_id}/lists/{list_id}`                              |
//! | `local_resource`     | `/accounts/{account_id}/local_resources/{resource_id}`                |
//! | `media`              | `/accounts/{account_id}/media/{media_id}`                             |
//! | `menu`               | `/accounts/{account_id}/menus/{menu_id}`                              |
//! | `metaflow`           | `/accounts/{account_id}/metaflows/{ignored}`                          |
//! | `migration`          | `/accounts/{account_id}/migrations/{migration_id}`                    |
//! | `notification`       | `/accounts/{account_id}/notifications/{notification_id}`              |
//! | `parked_call`        | `/accounts/{account_id}/parked_calls/{ignored}`                       |
//! | `phone_number`       | `/accounts/{account_id}/phone_numbers/{phone_number}`                 |
//! | `phone_number_doc`   | `/accounts/{account_id}/phone_numbers/{phone_number}/docs/{filename}` |
//! | `pivot_debug`        | `/accounts/{account_id}/pivot/debug/{call_id}`                        |
//! | `presence`           | `/accounts/{account_id}/presence/{ext_id}`                            |
//! | `queue`              | `/accounts/{account_id}/queues/{queue_id}`                            |
//! | `rate`               | `/accounts/{account_id}/rates/{rate_id}`                              |
//! | `rate_limit`         | `/accounts/{account_id}/rate_limits/{ignored}`                        |
//! | `recording`          | `/accounts/{account_id}/recordings/{recording_id}`                    |
//! | `registration`       | `/accounts/{account_id}/registrations/{ignored}`                      |
//! | `resource`           | `/accounts/{account_id}/resources/{resource_id}`                      |
//! | `schema`             | `/accounts/{account_id}/schemas/{schema_id}`                          |
//! | `security`           | `/accounts/{account_id}/security/{ignored}`                           |
//! | `server`             | `/accounts/{account_id}/servers/{server_id}`                          |
//! | `service`            | `/accounts/{account_id}/services/{service_id}`                        |
//! | `service_plan`       | `/accounts/{account_id}/service_plans/{plan_id}`                      |
//! | `skel`               | `/accounts/{account_id}/skels/{skel_id}`                              |
//! | `sms`                | `/accounts/{account_id}/sms/{sms_id}`                                 |
//! | `storage`            | `/accounts/{account_id}/storage/{ignored}`                            |
//! | `temporal_rule`      | `/accounts/{account_id}/temporal_rules/{rule_id}`                     |
//! | `temporal_rules_set` | `/accounts/{account_id}/temporal_rules_sets/{temporal_rules_set_id}`  |
//! | `transaction`        | `/accounts/{account_id}/transactions/{ignored}`                       |
//! | `user`               | `/accounts/{account_id}/users/{user_id}`                              |
//! | `voicemail_box`      | `/accounts/{account_id}/vmboxes/{vmbox_id}`                           |
//! | `webhook`            | `/accounts/{account_id}/webhooks/{webhook_id}`                        |
//! | `websocket`          | `/accounts/{account_id}/websockets/{websocket_id}`                    |
//! | `whitelabel`         | `/accounts/{account_id}/whitelabel/{whitelabel_id}`                   |

use crate::clients::HttpMethod;
use crate::error::ConfigError;
use crate::rest::descriptor::{ExtraView, MethodKind, ResourceDescriptor, Scope};
use crate::rest::registry::Registry;

impl Registry {
    /// Creates a registry holding the built-in Kazoo resource table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] only if the built-in table itself is
    /// inconsistent.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_descriptors(builtin_descriptors()?)
    }
}

/// Returns every built-in descriptor.
///
/// # Errors
///
/// Returns [`ConfigError`] only if a built-in descriptor is malformed.
pub fn builtin_descriptors() -> Result<Vec<ResourceDescriptor>, ConfigError> {
    Ok(vec![
        access_list()?,
        account()?,
        acdc_call_stat()?,
        acl()?,
        agent()?,
        alert()?,
        apps_link()?,
        apps_store()?,
        blacklist()?,
        braintree()?,
        bulk()?,
        call_inspector()?,
        callflow()?,
        cccp()?,
        cdr()?,
        channel()?,
        clicktocall()?,
        comment()?,
        conference()?,
        config()?,
        connectivity()?,
        contact_list()?,
        device()?,
        directory()?,
        fax()?,
        faxbox()?,
        freeswitch()?,
        global_resource()?,
        group()?,
        hotdesk()?,
        ip()?,
        limit()?,
        list()?,
        local_resource()?,
        media()?,
        menu()?,
        metaflow()?,
        migration()?,
        notification()?,
        parked_call()?,
        phone_number()?,
        phone_number_doc()?,
        pivot_debug()?,
        presence()?,
        queue()?,
        rate()?,
        rate_limit()?,
        recording()?,
        registration()?,
        resource()?,
        schema()?,
        security()?,
        server()?,
        service()?,
        service_plan()?,
        skel()?,
        sms()?,
        storage()?,
        temporal_rule()?,
        temporal_rules_set()?,
        transaction()?,
        user()?,
        voicemail_box()?,
        webhook()?,
        websocket()?,
        whitelabel()?,
    ])
}

fn object_view(name: &str, path: &str) -> ExtraView {
    ExtraView::new(name, path).scope(Scope::Object)
}

fn access_list() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("access_list", "/accounts/{account_id}/access_lists/{ignored}")
        .methods(&[MethodKind::List])
        .extra_view(ExtraView::new("update_access_lists", "").method(HttpMethod::Post))
        .extra_view(ExtraView::new("delete_access_lists", "").method(HttpMethod::Delete))
        .build()
}

fn account() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("account", "/accounts/{account_id}")
        .exclude_methods(&[MethodKind::List])
        .extra_view(object_view("get_account_children", "children"))
        .extra_view(object_view("get_account_descendants", "descendants"))
        .extra_view(object_view("get_account_siblings", "siblings"))
        .extra_view(object_view("get_account_tree", "tree"))
        .extra_view(object_view("get_account_parents", "parents"))
        .extra_view(object_view("get_account_apikey", "api_key"))
        .extra_view(object_view("create_api_key", "api_key").method(HttpMethod::Put))
        .extra_view(object_view("demote_reseller", "reseller").method(HttpMethod::Delete))
        .extra_view(object_view("promote_reseller", "reseller").method(HttpMethod::Put))
        .extra_view(object_view("move_account", "move").method(HttpMethod::Post))
        .build()
}

fn acdc_call_stat() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder(
        "acdc_call_stat",
        "/accounts/{account_id}/acdc_call_stats/{ignored}",
    )
    .methods(&[MethodKind::List])
    .build()
}

fn acl() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("acl", "/accounts/{account_id}/acls/{ignored}")
        .methods(&[MethodKind::List])
        .build()
}

fn agent() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("agent", "/accounts/{account_id}/agents/{agent_id}")
        .methods(&[MethodKind::List, MethodKind::Detail])
        .extra_view(ExtraView::new("get_agents_stats", "stats"))
        .extra_view(ExtraView::new("get_statuses", "statuses"))
        .extra_view(object_view("get_queue_status", "queue_status"))
        .extra_view(object_view("set_queue_status", "queue_status").method(HttpMethod::Post))
        .extra_view(object_view("set_agent_status", "status").method(HttpMethod::Post))
        .extra_view(object_view("get_agent_status", "status"))
        .extra_view(
            ExtraView::new("set_status_agent", "status/{agent_id}").method(HttpMethod::Post),
        )
        .extra_view(ExtraView::new("get_status_agent", "status/{agent_id}"))
        .build()
}

fn alert() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("alert", "/accounts/{account_id}/alerts/{alert_id}")
        .exclude_methods(&[MethodKind::Update, MethodKind::PartialUpdate])
        .build()
}

fn apps_link() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("apps_link", "/accounts/{account_id}/apps_link/authorize/{ignored}")
        .plural_name("apps_link")
        .methods(&[MethodKind::List])
        .build()
}

fn apps_store() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("apps_store", "/accounts/{account_id}/apps_store/{app_id}")
        .plural_name("apps_store")
        .exclude_methods(&[MethodKind::PartialUpdate])
        .method_name(MethodKind::List, "list_apps")
        .extra_view(object_view("install_app", "").method(HttpMethod::Put))
        .extra_view(object_view("get_icon", "icon"))
        .extra_view(object_view("get_screenshot", "screenshot/{screenshot_index}"))
        .extra_view(ExtraView::new("get_apps_blacklist", "blacklist"))
        .extra_view(ExtraView::new("update_apps_blacklist", "blacklist").method(HttpMethod::Post))
        .build()
}

fn blacklist() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("blacklist", "/accounts/{account_id}/blacklists/{blacklist_id}")
        .build()
}

fn braintree() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("braintree", "/accounts/{account_id}/braintree/{ignored}")
        .plural_name("braintree")
        .methods(&[])
        .extra_view(ExtraView::new("get_client_token", "client_token"))
        .extra_view(ExtraView::new("list_transactions", "transactions"))
        .extra_view(ExtraView::new("list_addresses", "addresses"))
        .extra_view(ExtraView::new("list_credits", "credits"))
        .extra_view(ExtraView::new("list_cards", "cards"))
        .extra_view(ExtraView::new("add_credits", "credits").method(HttpMethod::Put))
        .extra_view(ExtraView::new("get_transaction", "transactions/{transaction_id}"))
        .extra_view(ExtraView::new("add_cards", "cards").method(HttpMethod::Put))
        .extra_view(ExtraView::new("get_address", "addresses/{address_id}"))
        .extra_view(
            ExtraView::new("delete_address", "addresses/{address_id}").method(HttpMethod::Delete),
        )
        .extra_view(
            ExtraView::new("update_address", "addresses/{address_id}").method(HttpMethod::Post),
        )
        .extra_view(ExtraView::new("get_card", "cards/{card_id}"))
        .extra_view(ExtraView::new("delete_card", "cards/{card_id}").method(HttpMethod::Delete))
        .extra_view(ExtraView::new("update_card", "cards/{card_id}").method(HttpMethod::Post))
        .build()
}

fn bulk() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("bulk", "/accounts/{account_id}/bulk/{ignored}")
        .plural_name("bulk")
        .methods(&[MethodKind::List])
        .build()
}

fn call_inspector() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("call_inspector", "/accounts/{account_id}/call_inspector/{call_id}")
        .plural_name("call_inspector")
        .methods(&[MethodKind::List, MethodKind::Detail])
        .method_name(MethodKind::List, "list_calls")
        .method_name(MethodKind::Detail, "get_call")
        .build()
}

fn callflow() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("callflow", "/accounts/{account_id}/callflows/{callflow_id}").build()
}

fn cccp() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("cccp", "/accounts/{account_id}/cccps/{cccp_id}")
        .exclude_methods(&[MethodKind::PartialUpdate])
        .build()
}

fn cdr() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("cdr", "/accounts/{account_id}/cdrs/{cdr_id}")
        .methods(&[MethodKind::List, MethodKind::Detail])
        .extra_view(ExtraView::new("list_interactions", "interaction"))
        .extra_view(ExtraView::new("get_interaction", "legs/{interaction_id}"))
        .build()
}

fn channel() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("channel", "/accounts/{account_id}/channels/{channel_id}")
        .methods(&[MethodKind::List, MethodKind::Detail, MethodKind::Update])
        .extra_view(object_view("execute_command_on_channel", "").method(HttpMethod::Put))
        .build()
}

fn clicktocall() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder(
        "clicktocall",
        "/accounts/{account_id}/clicktocall/{clicktocall_id}",
    )
    .extra_view(object_view("get_clicktocall_history", "history"))
    .extra_view(object_view("clicktocall_connect", "connect").method(HttpMethod::Post))
    .extra_view(object_view("list_clicktocall_connects", "connect"))
    .build()
}

fn comment() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("comment", "/accounts/{account_id}/comments/{comment_id}")
        .exclude_methods(&[MethodKind::PartialUpdate])
        .extra_view(ExtraView::new("delete_all_comments", "").method(HttpMethod::Delete))
        .build()
}

fn conference() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("conference", "/accounts/{account_id}/conferences/{conference_id}")
        .extra_view(object_view("conference_action", "").method(HttpMethod::Put))
        .extra_view(object_view("list_participants", "participants"))
        .extra_view(object_view("action_participants", "participants").method(HttpMethod::Put))
        .extra_view(object_view("get_participant", "participants/{participant_id}"))
        .extra_view(
            object_view("action_participant", "participants/{participant_id}")
                .method(HttpMethod::Put),
        )
        .build()
}

fn config() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("config", "/accounts/{account_id}/configs/{config_id}")
        .exclude_methods(&[MethodKind::List, MethodKind::Create])
        .extra_view(object_view("create_config", "").method(HttpMethod::Put))
        .build()
}

fn connectivity() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder(
        "connectivity",
        "/accounts/{account_id}/connectivity/{connectivity_id}",
    )
    .plural_name("connectivities")
    .build()
}

fn contact_list() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("contact_list", "/accounts/{account_id}/contact_list/{ignored}")
        .plural_name("contact_list")
        .methods(&[MethodKind::List])
        .build()
}

fn device() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("device", "/accounts/{account_id}/devices/{device_id}")
        .extra_view(ExtraView::new("get_all_devices_status", "status"))
        .extra_view(object_view("reboot_device", "sync").method(HttpMethod::Post))
        .extra_view(object_view("make_device_quickcall", "quickcall/{phone_number}"))
        .extra_view(object_view("update_device_presence", "presence").method(HttpMethod::Post))
        .extra_view(object_view("get_device_channels", "channels"))
        .extra_view(object_view("get_device_ratelimits", "rate_limits"))
        .extra_view(
            object_view("update_device_ratelimits", "rate_limits").method(HttpMethod::Post),
        )
        .extra_view(object_view("get_device_access_lists", "access_lists"))
        .extra_view(
            object_view("delete_device_access_lists", "access_lists").method(HttpMethod::Delete),
        )
        .extra_view(
            object_view("update_device_access_lists", "access_lists").method(HttpMethod::Post),
        )
        .build()
}

fn directory() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("directory", "/accounts/{account_id}/directories/{directory_id}")
        .plural_name("directories")
        .build()
}

fn fax() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("fax", "/accounts/{account_id}/faxes/{fax_id}")
        .plural_name("faxes")
        .methods(&[MethodKind::Create])
        .extra_view(ExtraView::new("create_outgoing_fax", "outgoing").method(HttpMethod::Put))
        .extra_view(ExtraView::new("list_outgoing_faxes", "outgoing"))
        .extra_view(ExtraView::new("get_outgoing_fax", "outgoing/{fax_job_id}"))
        .extra_view(ExtraView::new("list_outbox_faxes", "outbox"))
        .extra_view(ExtraView::new("get_outbox_fax", "outbox/{fax_id}"))
        .extra_view(
            ExtraView::new("resubmit_outbox_fax", "outbox/{fax_id}").method(HttpMethod::Put),
        )
        .extra_view(ExtraView::new("get_fax_payload", "outbox/{fax_id}/attachment"))
        .extra_view(ExtraView::new("get_fax_smtp_logs", "smtplog"))
        .extra_view(ExtraView::new("get_fax_smtp_log", "smtplog/{attempt_id}"))
        .extra_view(
            ExtraView::new("delete_outbox_fax", "outbox/{fax_id}").method(HttpMethod::Delete),
        )
        .extra_view(
            ExtraView::new("delete_outbox_payload", "outbox/{fax_id}/attachment")
                .method(HttpMethod::Delete),
        )
        .extra_view(ExtraView::new("list_inbox_faxes", "inbox"))
        .extra_view(ExtraView::new("get_inbox_fax", "inbox/{fax_id}"))
        .extra_view(ExtraView::new("get_inbox_fax_payload", "inbox/{fax_id}/attachment"))
        .extra_view(ExtraView::new("delete_inbox_fax", "inbox/{fax_id}").method(HttpMethod::Delete))
        .extra_view(
            ExtraView::new("delete_inbox_fax_payload", "inbox/{fax_id}/attachment")
                .method(HttpMethod::Delete),
        )
        .extra_view(ExtraView::new("list_incoming_faxes", "incoming"))
        .extra_view(ExtraView::new("get_incoming_fax", "incoming/{fax_id}"))
        .extra_view(ExtraView::new("resubmit_inbox_fax", "inbox/{fax_id}").method(HttpMethod::Put))
        .build()
}

fn faxbox() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("faxbox", "/accounts/{account_id}/faxboxes/{faxbox_id}")
        .plural_name("faxboxes")
        .build()
}

fn freeswitch() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("freeswitch", "/accounts/{account_id}/freeswitch/{ignored}")
        .plural_name("freeswitch")
        .methods(&[MethodKind::List])
        .build()
}

fn global_resource() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder(
        "global_resource",
        "/accounts/{account_id}/global_resources/{resource_id}",
    )
    .build()
}

fn group() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("group", "/accounts/{account_id}/groups/{group_id}").build()
}

fn hotdesk() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("hotdesk", "/accounts/{account_id}/hotdesks/{ignored}")
        .methods(&[MethodKind::List])
        .build()
}

fn ip() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("ip", "/accounts/{account_id}/ips/{ip}")
        .exclude_methods(&[MethodKind::PartialUpdate])
        .extra_view(ExtraView::new("get_hosts", "hosts"))
        .extra_view(ExtraView::new("get_zones", "zones"))
        .extra_view(ExtraView::new("get_assigned", "assigned"))
        .extra_view(ExtraView::new("assign_ips", "").method(HttpMethod::Post))
        .build()
}

fn limit() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("limit", "/accounts/{account_id}/limits/{ignored}")
        .methods(&[MethodKind::List])
        .extra_view(ExtraView::new("update_limits", "").method(HttpMethod::Post))
        .build()
}

fn list() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("list", "/accounts/{account_id}/lists/{list_id}")
        .extra_view(object_view("list_entries", "entries"))
        .extra_view(object_view("add_entry", "entries").method(HttpMethod::Put))
        .extra_view(object_view("delete_entries", "entries").method(HttpMethod::Delete))
        .extra_view(object_view("get_entry", "entries/{entry_id}"))
        .extra_view(object_view("delete_entry", "entries/{entry_id}").method(HttpMethod::Delete))
        .extra_view(object_view("replace_entry", "entries/{entry_id}").method(HttpMethod::Post))
        .extra_view(object_view("update_entry", "entries/{entry_id}").method(HttpMethod::Patch))
        .extra_view(object_view("get_entry_vcard", "entries/{entry_id}/vcard"))
        .extra_view(
            object_view("add_entry_photo", "entries/{entry_id}/photo").method(HttpMethod::Post),
        )
        .build()
}

fn local_resource() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder(
        "local_resource",
        "/accounts/{account_id}/local_resources/{resource_id}",
    )
    .build()
}

fn media() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("media", "/accounts/{account_id}/media/{media_id}")
        .plural_name("media")
        .exclude_methods(&[MethodKind::PartialUpdate])
        .method_name(MethodKind::List, "get_all_media")
        .extra_view(ExtraView::new("get_prompts", "prompts"))
        .extra_view(ExtraView::new("list_languages", "languages"))
        .extra_view(ExtraView::new("get_prompt", "prompts/{prompt_id}"))
        .extra_view(object_view("get_media_file", "raw"))
        .build()
}

fn menu() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("menu", "/accounts/{account_id}/menus/{menu_id}").build()
}

fn metaflow() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("metaflow", "/accounts/{account_id}/metaflows/{ignored}")
        .methods(&[MethodKind::List])
        .extra_view(ExtraView::new("update_metaflows", "").method(HttpMethod::Post))
        .extra_view(ExtraView::new("delete_metaflows", "").method(HttpMethod::Delete))
        .build()
}

fn migration() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("migration", "/accounts/{account_id}/migrations/{migration_id}")
        .methods(&[MethodKind::List, MethodKind::Detail, MethodKind::Update])
        .build()
}

fn notification() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder(
        "notification",
        "/accounts/{account_id}/notifications/{notification_id}",
    )
    .exclude_methods(&[MethodKind::PartialUpdate])
    .extra_view(object_view("preview", "preview").method(HttpMethod::Post))
    .extra_view(ExtraView::new("delete_all_notifications", "").method(HttpMethod::Delete))
    .extra_view(
        ExtraView::new("customer_update", "customer_update/message").method(HttpMethod::Post),
    )
    .extra_view(ExtraView::new("list_smtp_logs", "smtplog"))
    .extra_view(ExtraView::new("get_smtp_log", "smtplog/{smtp_log_id}"))
    .build()
}

fn parked_call() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("parked_call", "/accounts/{account_id}/parked_calls/{ignored}")
        .methods(&[MethodKind::List])
        .build()
}

fn phone_number() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("phone_number", "/accounts/{account_id}/phone_numbers/{phone_number}")
        .methods(&[MethodKind::List, MethodKind::Update, MethodKind::Delete])
        .extra_view(object_view("activate_phone_number", "activate").method(HttpMethod::Put))
        .extra_view(object_view("reserve_phone_number", "reserve").method(HttpMethod::Put))
        .extra_view(object_view("add_port_in_number", "port").method(HttpMethod::Put))
        .extra_view(ExtraView::new("get_carriers_info", "carriers_info"))
        .extra_view(ExtraView::new("list_classifiers", "classifiers"))
        .extra_view(ExtraView::new("fix_issue", "fix").method(HttpMethod::Post))
        .extra_view(ExtraView::new("get_locality_info", "locality").method(HttpMethod::Post))
        .extra_view(
            ExtraView::new("check_phone_numbers_availability", "check").method(HttpMethod::Post),
        )
        .extra_view(
            ExtraView::new("update_numbers_collection", "collection").method(HttpMethod::Post),
        )
        .extra_view(
            ExtraView::new("partial_update_numbers_collection", "collection")
                .method(HttpMethod::Patch),
        )
        .extra_view(ExtraView::new("add_numbers_collection", "collection").method(HttpMethod::Put))
        .extra_view(ExtraView::new("list_numbers_collection", "collection"))
        .build()
}

fn phone_number_doc() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder(
        "phone_number_doc",
        "/accounts/{account_id}/phone_numbers/{phone_number}/docs/{filename}",
    )
    .methods(&[MethodKind::Delete])
    .build()
}

fn pivot_debug() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("pivot_debug", "/accounts/{account_id}/pivot/debug/{call_id}")
        .methods(&[MethodKind::List, MethodKind::Detail])
        .method_name(MethodKind::List, "get_pivots_debug")
        .method_name(MethodKind::Detail, "get_pivot_call_debug")
        .build()
}

fn presence() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("presence", "/accounts/{account_id}/presence/{ext_id}")
        .plural_name("presence")
        .methods(&[MethodKind::List, MethodKind::Update])
        .extra_view(ExtraView::new("get_presence_report", "report"))
        .build()
}

fn queue() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("queue", "/accounts/{account_id}/queues/{queue_id}")
        .extra_view(ExtraView::new("get_queues_stats", "stats"))
        .extra_view(object_view("get_queue_stats", "stats"))
        .extra_view(object_view("get_queue_stats_realtime", "stats/realtime"))
        .extra_view(object_view("get_roster", "roster"))
        .extra_view(object_view("add_roster", "roster").method(HttpMethod::Post))
        .extra_view(object_view("delete_roster", "roster").method(HttpMethod::Delete))
        .extra_view(ExtraView::new("create_eavesdrop", "eavesdrop").method(HttpMethod::Put))
        .extra_view(object_view("create_queue_eavesdrop", "eavesdrop").method(HttpMethod::Put))
        .build()
}

fn rate() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("rate", "/accounts/{account_id}/rates/{rate_id}")
        .extra_view(ExtraView::new("upload_rates", "").method(HttpMethod::Post))
        .extra_view(ExtraView::new("get_number_rate", "number/{phone_number}"))
        .build()
}

fn rate_limit() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("rate_limit", "/accounts/{account_id}/rate_limits/{ignored}")
        .methods(&[MethodKind::List])
        .extra_view(ExtraView::new("update_rate_limits", "").method(HttpMethod::Post))
        .extra_view(ExtraView::new("delete_rate_limits", "").method(HttpMethod::Delete))
        .build()
}

fn recording() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("recording", "/accounts/{account_id}/recordings/{recording_id}")
        .methods(&[MethodKind::List, MethodKind::Detail])
        .build()
}

fn registration() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("registration", "/accounts/{account_id}/registrations/{ignored}")
        .methods(&[MethodKind::List])
        .extra_view(ExtraView::new("delete_registrations", "").method(HttpMethod::Delete))
        .build()
}

fn resource() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("resource", "/accounts/{account_id}/resources/{resource_id}")
        .extra_view(ExtraView::new("list_jobs", "jobs"))
        .extra_view(ExtraView::new("create_job", "jobs").method(HttpMethod::Put))
        .extra_view(ExtraView::new("get_job", "jobs/{job_id}"))
        .extra_view(
            ExtraView::new("create_resource_collection", "collection").method(HttpMethod::Put),
        )
        .extra_view(
            ExtraView::new("update_resource_collection", "collection").method(HttpMethod::Post),
        )
        .build()
}

fn schema() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("schema", "/accounts/{account_id}/schemas/{schema_id}")
        .methods(&[MethodKind::List, MethodKind::Detail])
        .extra_view(object_view("validate_schema", "validate").method(HttpMethod::Put))
        .build()
}

fn security() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("security", "/accounts/{account_id}/security/{ignored}")
        .plural_name("security")
        .methods(&[MethodKind::List])
        .extra_view(ExtraView::new("update_security", "").method(HttpMethod::Post))
        .extra_view(ExtraView::new("delete_security", "").method(HttpMethod::Delete))
        .extra_view(ExtraView::new("partial_update_security", "").method(HttpMethod::Patch))
        .extra_view(ExtraView::new("list_attempts", "attempts"))
        .extra_view(ExtraView::new("get_attempt", "attempts/{attempt_id}"))
        .extra_view(ExtraView::new("list_auth_modules", "security").scope(Scope::System))
        .build()
}

fn server() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("server", "/accounts/{account_id}/servers/{server_id}")
        .methods(&[MethodKind::List])
        .extra_view(object_view("get_deployment", "deployment"))
        .extra_view(object_view("create_deployment", "deployment").method(HttpMethod::Put))
        .extra_view(ExtraView::new("get_server_log", "log"))
        .build()
}

fn service() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("service", "/accounts/{account_id}/services/{service_id}")
        .methods(&[MethodKind::List])
        .extra_view(ExtraView::new("update_services", "").method(HttpMethod::Post))
        .extra_view(ExtraView::new("get_audit_logs", "audit"))
        .extra_view(ExtraView::new("get_plan", "plan"))
        .extra_view(ExtraView::new("get_service_status", "status"))
        .extra_view(ExtraView::new("update_service_status", "status").method(HttpMethod::Post))
        .build()
}

fn service_plan() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("service_plan", "/accounts/{account_id}/service_plans/{plan_id}")
        .exclude_methods(&[MethodKind::PartialUpdate, MethodKind::Create])
        .extra_view(ExtraView::new("add_service_plans", "").method(HttpMethod::Post))
        .extra_view(ExtraView::new("get_current_plan", "current"))
        .extra_view(ExtraView::new("list_available_plans", "available"))
        .extra_view(ExtraView::new("get_available_plan", "available/{available_plan_id}"))
        .extra_view(
            ExtraView::new("sync_service_plans", "synchronization").method(HttpMethod::Post),
        )
        .extra_view(
            ExtraView::new("reconcile_service_plans", "reconciliation").method(HttpMethod::Post),
        )
        .build()
}

fn skel() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("skel", "/accounts/{account_id}/skels/{skel_id}").build()
}

fn sms() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("sms", "/accounts/{account_id}/sms/{sms_id}")
        .plural_name("sms")
        .exclude_methods(&[MethodKind::Update])
        .method_name(MethodKind::List, "list_sms")
        .build()
}

fn storage() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("storage", "/accounts/{account_id}/storage/{ignored}")
        .plural_name("storage")
        .methods(&[MethodKind::List, MethodKind::Create])
        .extra_view(ExtraView::new("create_storage_plan", "plans").method(HttpMethod::Put))
        .extra_view(ExtraView::new("list_storage_plans", "plans"))
        .extra_view(ExtraView::new("get_storage_plan", "plans/{plan_id}"))
        .extra_view(
            ExtraView::new("update_storage_plan", "plans/{plan_id}").method(HttpMethod::Post),
        )
        .extra_view(
            ExtraView::new("partial_update_storage_plan", "plans/{plan_id}")
                .method(HttpMethod::Patch),
        )
        .extra_view(
            ExtraView::new("delete_storage_plan", "plans/{plan_id}").method(HttpMethod::Delete),
        )
        .extra_view(ExtraView::new("delete_storage", "").method(HttpMethod::Delete))
        .extra_view(ExtraView::new("update_storage", "").method(HttpMethod::Post))
        .extra_view(ExtraView::new("partial_update_storage", "").method(HttpMethod::Patch))
        .build()
}

fn temporal_rule() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("temporal_rule", "/accounts/{account_id}/temporal_rules/{rule_id}")
        .build()
}

fn temporal_rules_set() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder(
        "temporal_rules_set",
        "/accounts/{account_id}/temporal_rules_sets/{temporal_rules_set_id}",
    )
    .build()
}

fn transaction() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("transaction", "/accounts/{account_id}/transactions/{ignored}")
        .methods(&[MethodKind::List])
        .extra_view(ExtraView::new("get_current_balance", "current_balance"))
        .extra_view(ExtraView::new("get_subscriptions", "subscriptions"))
        .extra_view(ExtraView::new("get_monthly_recurring", "monthly_recurring"))
        .extra_view(ExtraView::new("add_credit", "credit").method(HttpMethod::Put))
        .extra_view(ExtraView::new("remove_credit", "debit").method(HttpMethod::Delete))
        .build()
}

fn user() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("user", "/accounts/{account_id}/users/{user_id}")
        .extra_view(ExtraView::new("get_hotdesk", "hotdesks"))
        .extra_view(ExtraView::new("get_user_cdrs", "cdrs"))
        .extra_view(object_view("get_photo", "photo"))
        .extra_view(object_view("update_photo", "photo").method(HttpMethod::Post))
        .extra_view(object_view("delete_photo", "photo").method(HttpMethod::Delete))
        .extra_view(object_view("get_vcard", "vcard"))
        .extra_view(object_view("user_quickcall", "quickcall/{phone_number}"))
        .extra_view(object_view("update_user_presence", "presence").method(HttpMethod::Post))
        .extra_view(object_view("list_user_channels", "channels"))
        .extra_view(object_view("list_user_devices", "devices"))
        .extra_view(object_view("list_user_recordings", "recordings"))
        .extra_view(object_view("list_user_groups", "groups"))
        .build()
}

fn voicemail_box() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("voicemail_box", "/accounts/{account_id}/vmboxes/{vmbox_id}")
        .plural_name("voicemail_boxes")
        .build()
}

fn webhook() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("webhook", "/accounts/{account_id}/webhooks/{webhook_id}")
        .extra_view(ExtraView::new("get_webhook_attempts", "attempts"))
        .extra_view(object_view("get_webhook_attempt", "attempts"))
        .extra_view(ExtraView::new("enable_webhooks", "").method(HttpMethod::Patch))
        .extra_view(ExtraView::new("get_system_webhooks", "webhooks").scope(Scope::System))
        .build()
}

fn websocket() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("websocket", "/accounts/{account_id}/websockets/{websocket_id}")
        .methods(&[MethodKind::List, MethodKind::Detail])
        .extra_view(ExtraView::new("get_system_websockets", "websockets").scope(Scope::System))
        .build()
}

fn whitelabel() -> Result<ResourceDescriptor, ConfigError> {
    ResourceDescriptor::builder("whitelabel", "/accounts/{account_id}/whitelabel/{whitelabel_id}")
        .plural_name("whitelabel")
        .method_name(MethodKind::Detail, "get_whitelabel_domain")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::operation::{OperationArgs, OperationKind};

    #[test]
    fn test_builtin_table_registers_without_clashes() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.resources().count(), 66);
        assert!(registry.len() > 400);
    }

    #[test]
    fn test_account_has_no_list_operation() {
        let registry = Registry::builtin().unwrap();
        assert!(registry.operation("get_accounts").is_none());

        let get = registry.operation("get_account").unwrap();
        assert_eq!(get.signature(), ["account_id"]);
        let request = get
            .build_request(&OperationArgs::new().param("account_id", "A1"))
            .unwrap();
        assert_eq!(request.path, "/accounts/A1");
    }

    #[test]
    fn test_account_children_view() {
        let registry = Registry::builtin().unwrap();
        let request = registry
            .operation("get_account_children")
            .unwrap()
            .build_request(&OperationArgs::new().param("account_id", "A1"))
            .unwrap();
        assert_eq!(request.path, "/accounts/A1/children");
    }

    #[test]
    fn test_whitelabel_plural_is_not_suffixed() {
        let registry = Registry::builtin().unwrap();
        let list = registry.operation("get_whitelabel").unwrap();
        assert_eq!(list.kind(), OperationKind::Method(MethodKind::List));
        assert!(registry.operation("get_whitelabel_domain").is_some());
        assert!(registry.operation("get_whitelabels").is_none());
        assert!(registry.operation("get_voicemail_boxes").is_some());
    }

    #[test]
    fn test_websocket_system_view() {
        let registry = Registry::builtin().unwrap();
        let op = registry.operation("get_system_websockets").unwrap();
        let request = op
            .build_request(&OperationArgs::new().param("account_id", "ignored"))
            .unwrap();
        assert_eq!(request.path, "/websockets");
        assert!(registry.operation("create_websocket").is_none());
    }

    #[test]
    fn test_queue_roster_is_object_scoped() {
        let registry = Registry::builtin().unwrap();
        let op = registry.operation("add_roster").unwrap();
        assert_eq!(op.signature(), ["account_id", "queue_id"]);
        let request = op
            .build_request(
                &OperationArgs::new()
                    .param("account_id", "A1")
                    .param("queue_id", "Q1")
                    .data(serde_json::json!(["agent-1"])),
            )
            .unwrap();
        assert_eq!(request.http_method, HttpMethod::Post);
        assert_eq!(request.path, "/accounts/A1/queues/Q1/roster");
        assert!(registry.operation("get_queues_stats").is_some());
        assert!(registry.operation("get_agents_stats").is_some());
    }

    #[test]
    fn test_fax_outbox_view_takes_its_own_placeholder() {
        let registry = Registry::builtin().unwrap();
        let op = registry.operation("get_fax_payload").unwrap();
        assert_eq!(op.signature(), ["account_id", "fax_id"]);
        let request = op
            .build_request(
                &OperationArgs::new()
                    .param("account_id", "A1")
                    .param("fax_id", "F9"),
            )
            .unwrap();
        assert_eq!(request.path, "/accounts/A1/faxes/outbox/F9/attachment");
        assert!(registry.operation("get_faxes").is_none());
        assert!(registry.operation("create_fax").is_some());
    }

    #[test]
    fn test_braintree_exposes_only_views() {
        let registry = Registry::builtin().unwrap();
        assert!(registry.operation("get_braintree").is_none());
        let request = registry
            .operation("get_client_token")
            .unwrap()
            .build_request(&OperationArgs::new().param("account_id", "A1"))
            .unwrap();
        assert_eq!(request.path, "/accounts/A1/braintree/client_token");
    }

    #[test]
    fn test_nested_phone_number_doc_path() {
        let registry = Registry::builtin().unwrap();
        let op = registry.operation("delete_phone_number_doc").unwrap();
        assert_eq!(op.signature(), ["account_id", "phone_number", "filename"]);
        let request = op
            .build_request(
                &OperationArgs::new()
                    .param("account_id", "A1")
                    .param("phone_number", "+14155550100")
                    .param("filename", "loa.pdf"),
            )
            .unwrap();
        assert_eq!(
            request.path,
            "/accounts/A1/phone_numbers/%2B14155550100/docs/loa.pdf"
        );
    }

    #[test]
    fn test_system_webhooks_drop_account_prefix() {
        let registry = Registry::builtin().unwrap();
        let request = registry
            .operation("get_system_webhooks")
            .unwrap()
            .build_request(&OperationArgs::new().param("account_id", "A1"))
            .unwrap();
        assert_eq!(request.path, "/webhooks");
        assert!(registry.operation("enable_webhooks").is_some());
    }
}
