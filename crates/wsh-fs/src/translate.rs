//! Provider error identifier translation table.
//!
//! Maps the remote storage API's failure identifiers onto the closed
//! POSIX kind set. The table is a fixed match over the known identifiers,
//! reached only through [`kind_for_identifier`]; an identifier outside
//! the table translates to `None` and the original failure surfaces
//! unchanged.

use wsh_errors::ErrorKind;

/// Look up the POSIX kind for a provider failure identifier.
///
/// Returns `None` for identifiers outside the known set; translation
/// never invents a kind for an unrecognized identifier.
pub fn kind_for_identifier(identifier: &str) -> Option<ErrorKind> {
    let kind = match identifier {
        // === Missing subjects ===
        "subject_does_not_exist"
        | "source_does_not_exist"
        | "parent_does_not_exist"
        | "entry_not_found"
        | "shortcut_target_not_found"
        | "version_does_not_exist" => ErrorKind::NotFound,

        // === Name collisions ===
        "item_with_same_name_exists"
        | "dest_name_already_in_use"
        | "path_already_occupied"
        | "cannot_overwrite_existing_item" => ErrorKind::AlreadyExists,

        // === Directory misuse ===
        "cannot_read_a_directory" | "cannot_write_to_a_directory" | "is_a_directory" => {
            ErrorKind::IsDirectory
        }
        "dest_is_not_a_directory"
        | "parent_is_not_a_directory"
        | "readdir_of_non_directory"
        | "not_a_directory" => ErrorKind::NotDirectory,
        "directory_not_empty" | "cannot_delete_non_empty_directory" => ErrorKind::NotEmpty,

        // === Quota and size limits ===
        "storage_limit_reached" | "disk_full" | "quota_exceeded" => ErrorKind::NoSpace,
        "file_too_large" | "upload_too_large" | "max_file_size_exceeded" => ErrorKind::TooLarge,

        // === Authorization ===
        "forbidden"
        | "permission_denied"
        | "not_allowed_to_read"
        | "not_allowed_to_write"
        | "token_missing_permission"
        | "protected_item" => ErrorKind::AccessDenied,
        "operation_not_permitted"
        | "cannot_delete_root"
        | "cannot_move_root"
        | "cannot_move_item_into_itself"
        | "cannot_copy_item_into_itself"
        | "immutable_item" => ErrorKind::NotPermitted,

        // === Malformed requests ===
        "invalid_path"
        | "invalid_file_name"
        | "invalid_operation"
        | "missing_required_argument"
        | "field_invalid"
        | "source_and_dest_are_the_same"
        | "path_escapes_root" => ErrorKind::InvalidArgument,

        // === Backend failures ===
        "internal_error"
        | "storage_backend_error"
        | "read_failed"
        | "write_failed"
        | "checksum_mismatch"
        | "upstream_error" => ErrorKind::IoError,

        // === Handle pressure ===
        "too_many_open_handles" | "handle_limit_reached" | "too_many_concurrent_operations" => {
            ErrorKind::TooManyOpen
        }

        // === Transport ===
        "stream_interrupted" | "upload_interrupted" | "connection_closed_mid_transfer" => {
            ErrorKind::BrokenPipe
        }
        "response_timeout" | "request_timeout" | "lock_timeout" | "gateway_timeout" => {
            ErrorKind::TimedOut
        }
        "connection_refused" | "service_unavailable" => ErrorKind::ConnectionRefused,
        "connection_reset" | "socket_hangup" => ErrorKind::ConnectionReset,
        "address_in_use" | "port_in_use" | "subdomain_taken" => ErrorKind::AddressInUse,

        _ => return None,
    };
    Some(kind)
}
