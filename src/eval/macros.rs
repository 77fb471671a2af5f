macro_rules! pop_u256 {
	( $cs:expr, $( $x:ident ),* ) => (
		$(
			let $x = match $cs.stack.pop() {
				Ok(value) => value,
				Err(_) => return Control::Halt(Vec::new()),
			};
		)*
	);
}

macro_rules! push_u256 {
	( $cs:expr, $( $x:expr ),* ) => (
		$(
			if $cs.stack.push($x).is_err() {
				return Control::Halt(Vec::new());
			}
		)*
	)
}

macro_rules! try_mem {
	( $cs:expr, $config:expr, $offset:expr, $len:expr ) => {
		if !$cs.charge_memory($config, $offset, $len) {
			return Control::OutOfGas;
		}
	};
}

macro_rules! op1 {
	( $cs:expr, $f:path ) => {{
		pop_u256!($cs, op1);
		push_u256!($cs, $f(op1));
		Control::Continue
	}};
}

macro_rules! op2 {
	( $cs:expr, $f:path ) => {{
		pop_u256!($cs, op1, op2);
		push_u256!($cs, $f(op1, op2));
		Control::Continue
	}};
}

macro_rules! op3 {
	( $cs:expr, $f:path ) => {{
		pop_u256!($cs, op1, op2, op3);
		push_u256!($cs, $f(op1, op2, op3));
		Control::Continue
	}};
}
